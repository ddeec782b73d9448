use std::{str::FromStr, time::SystemTime};

use thiserror::Error;
use uuid::Uuid;

use crate::state::{
    board::LineBoard,
    relay::{LineId, RelayCommand, Switch},
};

/// High-level phases of the NIM game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NimPhase {
    /// No game has been started since the process came up.
    Idle,
    /// A game has been started; lines may or may not remain.
    InPlay,
}

/// Number of lines the human removes on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Take {
    /// Human turns one line off; the opponent answers with two.
    One,
    /// Human turns two lines off; the opponent answers with one.
    Two,
}

impl Take {
    /// Lines the scripted opponent answers with.
    pub fn opponent_count(self) -> u8 {
        match self {
            Take::One => 2,
            Take::Two => 1,
        }
    }

    /// Delay flags for the three removals of a turn, human moves first.
    fn removal_schedule(self) -> [bool; 3] {
        match self {
            Take::One => [false, true, false],
            Take::Two => [false, false, true],
        }
    }
}

/// Events that can be applied to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NimEvent {
    /// Start (or restart) a game with every line on.
    Play,
    /// Human turn followed immediately by the opponent's answer.
    Take(Take),
}

/// Raised when a spoken command is not one of the recognised game tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised game command `{0}`")]
pub struct UnknownCommand(pub String);

impl FromStr for NimEvent {
    type Err = UnknownCommand;

    /// Accepts `play`, the words `one` / `two`, and any number equal to 1 or 2.
    ///
    /// Numbers compare by value, so `1`, ` 1 `, `+1`, `01` and `1.0` all mean one.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "play" => return Ok(NimEvent::Play),
            "one" => return Ok(NimEvent::Take(Take::One)),
            "two" => return Ok(NimEvent::Take(Take::Two)),
            _ => {}
        }

        match token.trim().parse::<f64>() {
            Ok(value) if value == 1.0 => Ok(NimEvent::Take(Take::One)),
            Ok(value) if value == 2.0 => Ok(NimEvent::Take(Take::Two)),
            _ => Err(UnknownCommand(token.to_string())),
        }
    }
}

/// Snapshot of the current engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Phase at the time of the snapshot.
    pub phase: NimPhase,
    /// Identifier of the game started by the last `play`.
    pub game_id: Option<Uuid>,
    /// When the last `play` was applied.
    pub started_at: Option<SystemTime>,
    /// Increments on every applied event.
    pub version: usize,
    /// `(line, on)` pairs in registry order.
    pub lines: Vec<(LineId, bool)>,
    /// Lines still on.
    pub remaining: usize,
}

/// NIM engine: the scripted opponent always answers so that each round removes three lines.
#[derive(Debug, Clone)]
pub struct NimEngine {
    phase: NimPhase,
    board: LineBoard,
    delay_secs: u64,
    version: usize,
    game_id: Option<Uuid>,
    started_at: Option<SystemTime>,
}

impl NimEngine {
    /// Create an idle engine over `lines`, all switched on.
    pub fn new(lines: Vec<LineId>, delay_secs: u64) -> Self {
        Self {
            phase: NimPhase::Idle,
            board: LineBoard::new(lines),
            delay_secs,
            version: 0,
            game_id: None,
            started_at: None,
        }
    }

    /// Inspect the current phase.
    pub fn phase(&self) -> NimPhase {
        self.phase
    }

    /// Borrow the board backing the game.
    pub fn board(&self) -> &LineBoard {
        &self.board
    }

    /// Seconds the board waits before acting on a delayed command.
    pub fn delay_secs(&self) -> u64 {
        self.delay_secs
    }

    /// Create a snapshot of the current engine state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            game_id: self.game_id,
            started_at: self.started_at,
            version: self.version,
            lines: self.board.iter().collect(),
            remaining: self.board.remaining(),
        }
    }

    /// Apply `event`, mutating the board and returning the commands to publish
    /// in order.
    ///
    /// Every event is valid from every phase. A turn taken before any `play`
    /// runs against the start-up board.
    pub fn apply(&mut self, event: NimEvent) -> Vec<RelayCommand> {
        let commands = match event {
            NimEvent::Play => {
                self.board.reset();
                self.game_id = Some(Uuid::new_v4());
                self.started_at = Some(SystemTime::now());
                vec![RelayCommand::All(Switch::On)]
            }
            NimEvent::Take(take) => take
                .removal_schedule()
                .into_iter()
                .filter_map(|delayed| self.remove_next_on_line(delayed))
                .collect(),
        };

        self.phase = NimPhase::InPlay;
        self.version += 1;

        commands
    }

    /// Switch off the first line still on, returning `None` once the board is exhausted.
    pub fn remove_next_on_line(&mut self, delayed: bool) -> Option<RelayCommand> {
        let line = self.board.switch_off_first_on()?;
        Some(RelayCommand::switch_off(
            line,
            delayed.then_some(self.delay_secs),
        ))
    }
}
