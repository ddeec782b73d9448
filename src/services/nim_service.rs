use tracing::{debug, info};

use crate::{
    dto::skill::{SessionAttributes, SkillResponse, SpeechletResponse},
    state::{
        SharedState,
        state_machine::{NimEvent, Take},
    },
};

const RULES_SPEECH: &str = "<speak>Let's play NIM! The goal of the game is to be the one to turn off the last LED. You can only turn off one or two LEDs each turn. You can go first.</speak>";
const RULES_REPROMPT: &str = "<speak>Say one or two to turn off one or two LEDs.</speak>";
const CONFUSED_SPEECH: &str = "<speak>what?</speak>";

/// Play one NIM command: `play` restarts the board, `one` / `two` run a full round.
///
/// The write lock is held for the whole engine step so the three removals of a
/// round are never interleaved with another request.
pub async fn handle_command(
    state: &SharedState,
    title: &str,
    command: Option<&str>,
) -> SkillResponse {
    let Some((token, event)) =
        command.and_then(|token| token.parse::<NimEvent>().ok().map(|event| (token, event)))
    else {
        debug!(?command, "unrecognised NIM command");
        return respond(title, CONFUSED_SPEECH, Some(""));
    };

    let (commands, delay_secs, remaining) = {
        let mut nim = state.nim().write().await;
        let commands = nim.apply(event);
        (commands, nim.delay_secs(), nim.board().remaining())
    };

    state.outbox().send_all(&commands);
    info!(
        ?event,
        published = commands.len(),
        remaining,
        "NIM step applied"
    );

    match event {
        NimEvent::Play => respond(title, RULES_SPEECH, Some(RULES_REPROMPT)),
        NimEvent::Take(take) => {
            respond(title, &turn_speech(token.trim(), take, delay_secs), Some(""))
        }
    }
}

/// Speech for a round; the opponent's count is nominal even once the board is empty.
fn turn_speech(token: &str, take: Take, delay_secs: u64) -> String {
    format!(
        "<speak>You turned {token} LEDs off.<break time=\"{delay_secs}s\"/>I'll turn off {} LEDs.</speak>",
        take.opponent_count()
    )
}

fn respond(title: &str, output: &str, reprompt: Option<&str>) -> SkillResponse {
    SkillResponse::new(
        SessionAttributes::default(),
        SpeechletResponse::ssml(title, output, reprompt, false),
    )
}
