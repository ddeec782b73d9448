use std::convert::Infallible;

use axum::{Router, extract::State, response::sse::Sse, routing::get};
use futures::Stream;
use tracing::info;

use crate::{services::sse_service, state::SharedState};

#[utoipa::path(
    get,
    path = "/sse/relay",
    tag = "sse",
    responses((status = 200, description = "Relay dispatch SSE stream", content_type = "text/event-stream", body = String))
)]
/// Stream every relay message the dispatcher hands to the publisher.
pub async fn relay_stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>> {
    let receiver = sse_service::subscribe_relay(&state);
    info!("New relay SSE connection");
    sse_service::broadcast_info(&state, "relay stream connected");
    sse_service::to_sse_stream(receiver)
}

/// Configure the SSE endpoints.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/sse/relay", get(relay_stream))
}
