use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI document for the relay skill backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::skill::handle_skill_request,
        crate::routes::nim::get_nim_state,
        crate::routes::sse::relay_stream,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::skill::SkillRequest,
            crate::dto::skill::SkillResponse,
            crate::dto::nim::NimSnapshotResponse,
            crate::dto::sse::RelayDispatchedEvent,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "skill", description = "Voice platform skill endpoint"),
        (name = "nim", description = "NIM game inspection"),
        (name = "sse", description = "Server-sent events streams"),
    )
)]
pub struct ApiDoc;
