use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use axum_valid::{Valid, ValidRejection};

use crate::{
    dto::skill::{SkillRequest, SkillResponse},
    error::AppError,
    services::skill_service,
    state::SharedState,
};

/// Entry point the voice platform posts every skill event to.
pub fn router() -> Router<SharedState> {
    Router::new().route("/skill", post(handle_skill_request))
}

/// Dispatch one voice-platform event and answer with speech.
///
/// Malformed or invalid envelopes answer 400 with the same `{message}` body as
/// every other error.
#[utoipa::path(
    post,
    path = "/skill",
    tag = "skill",
    request_body = SkillRequest,
    responses(
        (status = 200, description = "Speech response", body = SkillResponse),
        (status = 204, description = "Session ended; nothing to say"),
        (status = 400, description = "Invalid envelope, unknown intent or unsupported request type")
    )
)]
pub async fn handle_skill_request(
    State(state): State<SharedState>,
    payload: Result<Valid<Json<SkillRequest>>, ValidRejection<JsonRejection>>,
) -> Result<Response, AppError> {
    let Valid(Json(payload)) = payload?;
    let response = match skill_service::handle_request(&state, payload).await? {
        Some(speech) => Json(speech).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };
    Ok(response)
}
