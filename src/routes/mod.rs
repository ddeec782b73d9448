use axum::Router;

use crate::state::SharedState;

/// Swagger UI.
pub mod docs;
/// Health check.
pub mod health;
/// NIM game inspection.
pub mod nim;
/// Voice platform skill endpoint.
pub mod skill;
/// Server-sent event streams.
pub mod sse;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(skill::router())
        .merge(nim::router())
        .merge(sse::router())
        .merge(docs::router());

    api_router.with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::{config::AppConfig, state::AppState};

    fn intent_event(name: &str, slots: Value) -> Value {
        json!({
            "version": "1.0",
            "session": {
                "new": false,
                "sessionId": "SessionId.test",
                "application": { "applicationId": "amzn1.ask.skill.test" }
            },
            "request": {
                "type": "IntentRequest",
                "requestId": "EdwRequestId.test",
                "intent": { "name": name, "slots": slots }
            }
        })
    }

    async fn post_skill(app: Router<()>, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/skill")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn nim_round_trip_over_http() {
        let (state, mut rx) = AppState::new(AppConfig::default(), "test");
        let app = router(state.clone());

        let (status, _) = post_skill(
            app.clone(),
            intent_event("RelayNimIntent", json!({ "Command": { "name": "Command", "value": "play" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = post_skill(
            app.clone(),
            intent_event("RelayNimIntent", json!({ "Command": { "name": "Command", "value": "one" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"]["outputSpeech"]["type"], "SSML");
        assert_eq!(
            body["response"]["outputSpeech"]["ssml"],
            "<speak>You turned one LEDs off.<break time=\"2s\"/>I'll turn off 2 LEDs.</speak>"
        );
        assert_eq!(body["response"]["shouldEndSession"], false);

        let payloads: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|message| message.payload)
            .collect();
        assert_eq!(payloads, ["on", "31 off", "30 off 2", "29 off"]);

        let response = app
            .oneshot(Request::builder().uri("/nim").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let snapshot: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(snapshot["phase"], "in_play");
        assert_eq!(snapshot["remaining"], 6);
        assert_eq!(snapshot["lines"][0], json!({ "id": 31, "on": false }));
        assert_eq!(snapshot["lines"][3], json!({ "id": 33, "on": true }));
    }

    #[tokio::test]
    async fn unknown_intent_is_a_bad_request() {
        let (state, _rx) = AppState::new(AppConfig::default(), "test");
        let (status, body) =
            post_skill(router(state), intent_event("OrderPizzaIntent", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "bad request: invalid intent `OrderPizzaIntent`");
    }

    #[tokio::test]
    async fn empty_intent_name_fails_validation() {
        let (state, _rx) = AppState::new(AppConfig::default(), "test");
        let (status, body) = post_skill(router(state), intent_event("", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["message"]
                .as_str()
                .is_some_and(|message| message.contains("intent name must not be empty")),
            "unexpected body: {body}"
        );
    }

    #[tokio::test]
    async fn malformed_envelope_is_a_json_bad_request() {
        let (state, _rx) = AppState::new(AppConfig::default(), "test");
        let (status, body) = post_skill(router(state), json!({ "version": "1.0" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().is_some_and(|message| !message.is_empty()));
    }

    #[tokio::test]
    async fn session_end_returns_no_content() {
        let (state, _rx) = AppState::new(AppConfig::default(), "test");
        let event = json!({
            "version": "1.0",
            "session": { "new": false, "sessionId": "SessionId.test" },
            "request": { "type": "SessionEndedRequest", "requestId": "r", "reason": "USER_INITIATED" }
        });
        let (status, body) = post_skill(router(state), event).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn healthcheck_reports_publisher() {
        let (state, _rx) = AppState::new(AppConfig::default(), "log");
        let response = router(state)
            .oneshot(
                Request::builder()
                    .uri("/healthcheck")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "status": "ok", "publisher": "log" }));
    }
}
