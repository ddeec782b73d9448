use std::str::FromStr;

use tracing::info;

use crate::{
    dto::skill::{
        Intent, SessionAttributes, SkillRequest, SkillRequestBody, SkillResponse, SpeechletResponse,
    },
    error::ServiceError,
    services::{nim_service, relay_service},
    state::SharedState,
};

const SLOT_STATUS: &str = "Status";
const SLOT_GPIO: &str = "Gpio";
const SLOT_COMMAND: &str = "Command";

/// Intents the skill model declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillIntent {
    /// Switch the whole board.
    RelayStatus,
    /// Switch one port.
    RelayGpio,
    /// Play a NIM command.
    RelayNim,
    /// Repeat the welcome prompt.
    Help,
    /// Leave the skill.
    Stop,
    /// Leave the skill.
    Cancel,
}

impl FromStr for SkillIntent {
    type Err = ServiceError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "RelayStatusIsIntent" => Ok(SkillIntent::RelayStatus),
            "RelayGpioActivateIntent" => Ok(SkillIntent::RelayGpio),
            "RelayNimIntent" => Ok(SkillIntent::RelayNim),
            "AMAZON.HelpIntent" => Ok(SkillIntent::Help),
            "AMAZON.StopIntent" => Ok(SkillIntent::Stop),
            "AMAZON.CancelIntent" => Ok(SkillIntent::Cancel),
            other => Err(ServiceError::UnknownIntent(other.to_string())),
        }
    }
}

/// Route a platform event to its handler.
///
/// Returns `None` for session-ended notifications, which carry no speech.
pub async fn handle_request(
    state: &SharedState,
    request: SkillRequest,
) -> Result<Option<SkillResponse>, ServiceError> {
    let SkillRequest {
        session, request, ..
    } = request;
    let application_id = session
        .application
        .as_ref()
        .map(|application| application.application_id.as_str());
    info!(session_id = %session.session_id, ?application_id, "skill event received");

    if session.new {
        if let Some(request_id) = request_id(&request) {
            info!(%request_id, session_id = %session.session_id, "session started");
        }
    }

    match request {
        SkillRequestBody::LaunchRequest { request_id } => {
            info!(%request_id, session_id = %session.session_id, "launch");
            Ok(Some(welcome()))
        }
        SkillRequestBody::IntentRequest { request_id, intent } => {
            info!(%request_id, session_id = %session.session_id, intent = %intent.name, "intent");
            handle_intent(state, &intent).await.map(Some)
        }
        SkillRequestBody::SessionEndedRequest { request_id, reason } => {
            info!(%request_id, session_id = %session.session_id, ?reason, "session ended");
            Ok(None)
        }
        SkillRequestBody::Unknown => Err(ServiceError::UnsupportedRequest),
    }
}

/// Dispatch a single intent by its parsed variant.
pub async fn handle_intent(
    state: &SharedState,
    intent: &Intent,
) -> Result<SkillResponse, ServiceError> {
    let title = intent.name.as_str();
    let response = match intent.name.parse::<SkillIntent>()? {
        SkillIntent::RelayStatus => {
            relay_service::set_global_status(state, title, intent.slot_value(SLOT_STATUS))
        }
        SkillIntent::RelayGpio => relay_service::set_line_status(
            state,
            title,
            intent.slot_value(SLOT_GPIO),
            intent.slot_value(SLOT_STATUS),
        ),
        SkillIntent::RelayNim => {
            nim_service::handle_command(state, title, intent.slot_value(SLOT_COMMAND)).await
        }
        SkillIntent::Help => welcome(),
        SkillIntent::Stop | SkillIntent::Cancel => session_end(),
    };

    Ok(response)
}

fn request_id(request: &SkillRequestBody) -> Option<&str> {
    match request {
        SkillRequestBody::LaunchRequest { request_id }
        | SkillRequestBody::IntentRequest { request_id, .. }
        | SkillRequestBody::SessionEndedRequest { request_id, .. } => Some(request_id.as_str()),
        SkillRequestBody::Unknown => None,
    }
}

fn welcome() -> SkillResponse {
    SkillResponse::new(
        SessionAttributes::default(),
        SpeechletResponse::plain(
            "Welcome",
            "Welcome to the Dragonboard control. ",
            Some("Control the Dragonboard by telling me which port you want to control."),
            false,
        ),
    )
}

fn session_end() -> SkillResponse {
    SkillResponse::new(
        SessionAttributes::default(),
        SpeechletResponse::plain(
            "Session Ended",
            "Closing Dragonboard control. Have a nice day!",
            None,
            true,
        ),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{
        config::AppConfig,
        dto::skill::{SkillSession, Slot},
        state::AppState,
    };

    fn intent(name: &str, slots: &[(&str, &str)]) -> Intent {
        Intent {
            name: name.to_string(),
            slots: slots
                .iter()
                .map(|(key, value)| {
                    (
                        key.to_string(),
                        Slot {
                            name: Some(key.to_string()),
                            value: Some(value.to_string()),
                        },
                    )
                })
                .collect::<HashMap<_, _>>(),
        }
    }

    fn request(body: SkillRequestBody) -> SkillRequest {
        SkillRequest {
            version: "1.0".into(),
            session: SkillSession {
                new: false,
                session_id: "session-1".into(),
                application: None,
            },
            request: body,
        }
    }

    #[test]
    fn intent_names_parse_to_variants() {
        assert_eq!("RelayNimIntent".parse::<SkillIntent>().unwrap(), SkillIntent::RelayNim);
        assert_eq!(
            "AMAZON.CancelIntent".parse::<SkillIntent>().unwrap(),
            SkillIntent::Cancel
        );
        assert!(matches!(
            "relaynimintent".parse::<SkillIntent>(),
            Err(ServiceError::UnknownIntent(name)) if name == "relaynimintent"
        ));
    }

    #[tokio::test]
    async fn unknown_intent_fails_the_request() {
        let (state, mut rx) = AppState::new(AppConfig::default(), "test");
        let result = handle_intent(&state, &intent("OrderPizzaIntent", &[])).await;
        assert!(matches!(result, Err(ServiceError::UnknownIntent(_))));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn gpio_intent_routes_both_slots() {
        let (state, mut rx) = AppState::new(AppConfig::default(), "test");
        let response = handle_intent(
            &state,
            &intent("RelayGpioActivateIntent", &[("Gpio", "27"), ("Status", "off")]),
        )
        .await
        .unwrap();
        assert_eq!(response.response.spoken(), Some("Port 27 has been turned off"));
        assert_eq!(response.response.card.title, "SessionSpeechlet - RelayGpioActivateIntent");
        assert_eq!(rx.try_recv().unwrap().payload, "27 off");
    }

    #[tokio::test]
    async fn nim_intent_routes_the_command_slot() {
        let (state, mut rx) = AppState::new(AppConfig::default(), "test");
        handle_intent(&state, &intent("RelayNimIntent", &[("Command", "play")]))
            .await
            .unwrap();
        assert_eq!(rx.try_recv().unwrap().payload, "on");
    }

    #[tokio::test]
    async fn stop_and_cancel_end_the_session() {
        let (state, _rx) = AppState::new(AppConfig::default(), "test");
        for name in ["AMAZON.StopIntent", "AMAZON.CancelIntent"] {
            let response = handle_intent(&state, &intent(name, &[])).await.unwrap();
            assert!(response.response.should_end_session);
            assert_eq!(
                response.response.spoken(),
                Some("Closing Dragonboard control. Have a nice day!")
            );
        }
    }

    #[tokio::test]
    async fn launch_and_help_welcome_the_user() {
        let (state, _rx) = AppState::new(AppConfig::default(), "test");

        let launch = handle_request(
            &state,
            request(SkillRequestBody::LaunchRequest {
                request_id: "r1".into(),
            }),
        )
        .await
        .unwrap()
        .unwrap();
        let help = handle_intent(&state, &intent("AMAZON.HelpIntent", &[]))
            .await
            .unwrap();

        assert_eq!(launch.response, help.response);
        assert!(!launch.response.should_end_session);
        assert_eq!(launch.response.card.title, "SessionSpeechlet - Welcome");
    }

    #[tokio::test]
    async fn session_end_has_no_speech() {
        let (state, _rx) = AppState::new(AppConfig::default(), "test");
        let outcome = handle_request(
            &state,
            request(SkillRequestBody::SessionEndedRequest {
                request_id: "r2".into(),
                reason: Some("USER_INITIATED".into()),
            }),
        )
        .await
        .unwrap();
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn unknown_request_type_is_rejected() {
        let (state, _rx) = AppState::new(AppConfig::default(), "test");
        let outcome = handle_request(&state, request(SkillRequestBody::Unknown)).await;
        assert!(matches!(outcome, Err(ServiceError::UnsupportedRequest)));
    }
}
