use tracing::{debug, info};

use crate::{
    dto::skill::{SessionAttributes, SkillResponse, SpeechletResponse},
    state::{
        SharedState,
        relay::{LineId, RelayCommand, Switch},
    },
};

/// Switch the whole board on or off.
///
/// Anything but the exact `on` / `off` tokens publishes nothing and answers with empty speech.
pub fn set_global_status(state: &SharedState, title: &str, status: Option<&str>) -> SkillResponse {
    let Some(switch) = status.and_then(|value| value.parse::<Switch>().ok()) else {
        debug!(?status, "ignoring global status request");
        return silent(title);
    };

    state.outbox().send(&RelayCommand::All(switch));
    info!(%switch, "board switched");

    SkillResponse::new(
        SessionAttributes::desired_status(switch.as_str()),
        SpeechletResponse::plain(
            title,
            &format!("The light has been turned {switch}"),
            Some(""),
            false,
        ),
    )
}

/// Switch a single port on or off.
///
/// The port passes when its leading integer clears the configured bound
/// check; the status must be the exact `on` / `off` token. The port is
/// forwarded and spoken exactly as given.
pub fn set_line_status(
    state: &SharedState,
    title: &str,
    port: Option<&str>,
    status: Option<&str>,
) -> SkillResponse {
    let bounds = state.config().port_bounds;
    let port = port.filter(|value| {
        leading_integer(value).is_some_and(|line| bounds.accepts(line))
    });
    let switch = status.and_then(|value| value.parse::<Switch>().ok());

    let (Some(port), Some(switch)) = (port, switch) else {
        debug!(?port, ?status, "ignoring port status request");
        return silent(title);
    };

    state.outbox().send(&RelayCommand::Port {
        port: port.to_string(),
        switch,
    });
    info!(port, %switch, "port switched");

    SkillResponse::new(
        SessionAttributes::desired_status(switch.as_str()),
        SpeechletResponse::plain(
            title,
            &format!("Port {port} has been turned {switch}"),
            Some(""),
            false,
        ),
    )
}

/// Integer prefix of `value`: optional leading whitespace and sign, then digits.
///
/// Trailing text is ignored (`24.5` is 24). Magnitudes beyond [`LineId`] saturate.
fn leading_integer(value: &str) -> Option<LineId> {
    let value = value.trim_start();
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let digits = rest.bytes().take_while(|byte| byte.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let magnitude = rest[..digits].parse::<LineId>().unwrap_or(LineId::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn silent(title: &str) -> SkillResponse {
    SkillResponse::new(
        SessionAttributes::default(),
        SpeechletResponse::plain(title, "", Some(""), false),
    )
}
