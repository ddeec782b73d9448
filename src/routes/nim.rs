use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::nim::NimSnapshotResponse, state::SharedState};

#[utoipa::path(
    get,
    path = "/nim",
    tag = "nim",
    responses((status = 200, description = "Current NIM game", body = NimSnapshotResponse))
)]
/// Return the backend's logical view of the NIM board.
pub async fn get_nim_state(State(state): State<SharedState>) -> Json<NimSnapshotResponse> {
    Json(state.snapshot().await.into())
}

/// Read-only game inspection endpoints.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/nim", get(get_nim_state))
}
