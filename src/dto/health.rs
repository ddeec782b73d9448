use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Transport relay messages are handed to ("http" or "log").
    pub publisher: String,
}

impl HealthResponse {
    /// Create a health response indicating relay messages are flowing.
    pub fn ok(publisher: &str) -> Self {
        Self {
            status: "ok".to_string(),
            publisher: publisher.to_string(),
        }
    }

    /// Create a health response indicating the relay dispatcher has stopped.
    pub fn degraded(publisher: &str) -> Self {
        Self {
            status: "degraded".to_string(),
            publisher: publisher.to_string(),
        }
    }
}
