use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// Envelope version echoed in every response.
const RESPONSE_VERSION: &str = "1.0";
/// Prefix the voice platform app shows on every card.
const CARD_PREFIX: &str = "SessionSpeechlet";

/// Inbound voice-platform event.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SkillRequest {
    /// Envelope format version.
    pub version: String,
    /// Conversation the event belongs to.
    pub session: SkillSession,
    /// The event itself.
    pub request: SkillRequestBody,
}

impl Validate for SkillRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.version.trim().is_empty() {
            let mut err = ValidationError::new("version");
            err.message = Some("envelope version must not be empty".into());
            errors.add("version", err);
        }

        if self.session.session_id.trim().is_empty() {
            let mut err = ValidationError::new("session_id");
            err.message = Some("session id must not be empty".into());
            errors.add("session", err);
        }

        errors.merge_self("request", self.request.validate());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Conversation the event belongs to.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillSession {
    /// True on the first event of a conversation.
    #[serde(default)]
    pub new: bool,
    /// Platform session identifier.
    pub session_id: String,
    /// Skill the event was routed for.
    #[serde(default)]
    pub application: Option<SkillApplication>,
}

/// Skill identity the platform routed the event for.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillApplication {
    /// Platform skill identifier.
    pub application_id: String,
}

/// Request payload, discriminated by its `type`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(tag = "type")]
pub enum SkillRequestBody {
    /// The user opened the skill without asking for anything.
    LaunchRequest {
        /// Platform request identifier.
        #[serde(rename = "requestId")]
        request_id: String,
    },
    /// The user's utterance was matched to an intent.
    IntentRequest {
        /// Platform request identifier.
        #[serde(rename = "requestId")]
        request_id: String,
        /// Matched intent and its slots.
        intent: Intent,
    },
    /// The platform closed the conversation.
    SessionEndedRequest {
        /// Platform request identifier.
        #[serde(rename = "requestId")]
        request_id: String,
        /// Why the platform closed the session.
        #[serde(default)]
        reason: Option<String>,
    },
    /// Any request type this skill does not handle.
    #[serde(other)]
    Unknown,
}

impl Validate for SkillRequestBody {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let SkillRequestBody::IntentRequest { intent, .. } = self {
            if intent.name.trim().is_empty() {
                let mut err = ValidationError::new("intent_name");
                err.message = Some("intent name must not be empty".into());
                errors.add("intent", err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Named intent and the slot values the platform extracted.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct Intent {
    /// Intent name declared in the interaction model.
    pub name: String,
    /// Slots keyed by name.
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    /// Value of slot `name`, when the platform filled it.
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|slot| slot.value.as_deref())
    }
}

/// Single slot; `value` is absent when the user did not say it.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct Slot {
    /// Slot name.
    #[serde(default)]
    pub name: Option<String>,
    /// Value the user said, when filled.
    #[serde(default)]
    pub value: Option<String>,
}

/// Outbound envelope returned to the voice platform.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    /// Envelope format version, always `1.0`.
    pub version: String,
    /// Attributes carried into the next event.
    pub session_attributes: SessionAttributes,
    /// What the assistant says and shows.
    pub response: SpeechletResponse,
}

impl SkillResponse {
    /// Wrap a speechlet with the session attributes to carry forward.
    pub fn new(session_attributes: SessionAttributes, response: SpeechletResponse) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            session_attributes,
            response,
        }
    }
}

/// Attributes the platform hands back on the next event of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionAttributes {
    /// Last relay status the user asked for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_relay_status: Option<String>,
}

impl SessionAttributes {
    /// Attributes remembering the last status the user asked for.
    pub fn desired_status(status: impl Into<String>) -> Self {
        Self {
            desired_relay_status: Some(status.into()),
        }
    }
}

/// Speech, card and reprompt for one turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpeechletResponse {
    /// Speech for this turn.
    pub output_speech: OutputSpeech,
    /// Companion app card.
    pub card: Card,
    /// Speech used if the user stays silent.
    pub reprompt: Reprompt,
    /// Whether the platform closes the session after speaking.
    pub should_end_session: bool,
}

impl SpeechletResponse {
    /// Plain-text speech.
    pub fn plain(
        title: &str,
        output: &str,
        reprompt: Option<&str>,
        should_end_session: bool,
    ) -> Self {
        Self {
            output_speech: OutputSpeech::plain(Some(output)),
            card: Card::simple(title, output),
            reprompt: Reprompt {
                output_speech: OutputSpeech::plain(reprompt),
            },
            should_end_session,
        }
    }

    /// SSML speech; `output` and `reprompt` must already be wrapped in `<speak>`.
    pub fn ssml(
        title: &str,
        output: &str,
        reprompt: Option<&str>,
        should_end_session: bool,
    ) -> Self {
        Self {
            output_speech: OutputSpeech::ssml(Some(output)),
            card: Card::simple(title, output),
            reprompt: Reprompt {
                output_speech: OutputSpeech::ssml(reprompt),
            },
            should_end_session,
        }
    }

    /// Text the assistant will say, regardless of mode.
    pub fn spoken(&self) -> Option<&str> {
        match &self.output_speech {
            OutputSpeech::PlainText { text } => text.as_deref(),
            OutputSpeech::Ssml { ssml } => ssml.as_deref(),
        }
    }
}

/// Speech in plain text or SSML mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    /// Spoken as written.
    PlainText {
        /// Text to say.
        text: Option<String>,
    },
    /// Speech Synthesis Markup, allowing pauses.
    #[serde(rename = "SSML")]
    Ssml {
        /// Markup wrapped in `<speak>`.
        ssml: Option<String>,
    },
}

impl OutputSpeech {
    fn plain(text: Option<&str>) -> Self {
        OutputSpeech::PlainText {
            text: text.map(str::to_string),
        }
    }

    fn ssml(ssml: Option<&str>) -> Self {
        OutputSpeech::Ssml {
            ssml: ssml.map(str::to_string),
        }
    }
}

/// Card shown in the companion app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Card {
    /// Card layout, always `Simple`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Card heading.
    pub title: String,
    /// Card body.
    pub content: String,
}

impl Card {
    fn simple(title: &str, content: &str) -> Self {
        Self {
            kind: "Simple".to_string(),
            title: format!("{CARD_PREFIX} - {title}"),
            content: format!("{CARD_PREFIX} - {content}"),
        }
    }
}

/// Speech used when the user does not answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    /// Speech to repeat.
    pub output_speech: OutputSpeech,
}
