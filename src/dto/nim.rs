use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::format_system_time,
    state::{
        Snapshot,
        relay::LineId,
        state_machine::NimPhase,
    },
};

/// Publicly visible game phase.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibleNimPhase {
    /// No game started since the process came up.
    Idle,
    /// A game has been started.
    InPlay,
}

impl From<NimPhase> for VisibleNimPhase {
    fn from(value: NimPhase) -> Self {
        match value {
            NimPhase::Idle => VisibleNimPhase::Idle,
            NimPhase::InPlay => VisibleNimPhase::InPlay,
        }
    }
}

/// Logical state of one line.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct LineState {
    /// Registry line identifier.
    pub id: LineId,
    /// Whether the game considers the line lit.
    pub on: bool,
}

/// Current NIM game as tracked by the backend (not read back from the board).
#[derive(Debug, Serialize, ToSchema)]
pub struct NimSnapshotResponse {
    /// Current phase.
    pub phase: VisibleNimPhase,
    /// Identifier of the game started by the last `play`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<Uuid>,
    /// RFC 3339 timestamp of the last `play`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    /// Number of events applied since start-up.
    pub version: usize,
    /// Lines in registry order.
    pub lines: Vec<LineState>,
    /// Lines still on.
    pub remaining: usize,
}

impl From<Snapshot> for NimSnapshotResponse {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            phase: snapshot.phase.into(),
            game_id: snapshot.game_id,
            started_at: snapshot.started_at.map(format_system_time),
            version: snapshot.version,
            lines: snapshot
                .lines
                .into_iter()
                .map(|(id, on)| LineState { id, on })
                .collect(),
            remaining: snapshot.remaining,
        }
    }
}
