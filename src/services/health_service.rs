use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether relay messages can still reach the publisher.
pub fn health_status(state: &SharedState) -> HealthResponse {
    let publisher = state.publisher();
    if state.is_degraded() {
        warn!(publisher, "relay dispatcher stopped (degraded mode)");
        HealthResponse::degraded(publisher)
    } else {
        HealthResponse::ok(publisher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, state::AppState};

    #[test]
    fn degraded_once_dispatcher_is_gone() {
        let (state, rx) = AppState::new(AppConfig::default(), "log");
        assert_eq!(health_status(&state).status, "ok");

        drop(rx);
        let status = health_status(&state);
        assert_eq!(status.status, "degraded");
        assert_eq!(status.publisher, "log");
    }
}
