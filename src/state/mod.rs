/// Line registry and on/off state.
pub mod board;
/// Fire-and-forget relay queue.
pub mod outbox;
/// Relay commands and their wire encoding.
pub mod relay;
mod sse;
/// NIM game engine.
pub mod state_machine;

use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};

use crate::config::AppConfig;

use self::relay::RelayMessage;

pub use self::outbox::Outbox;
pub use self::sse::SseHub;
pub use self::state_machine::{NimEngine, Snapshot};

/// Handle shared by every handler and background task.
pub type SharedState = Arc<AppState>;

const RELAY_SSE_CAPACITY: usize = 32;

/// Central application state: configuration, the shared NIM game and the relay queue.
///
/// Every request served by the process plays against the same game. Each engine
/// step runs under the write lock, so a turn is never torn, but turns from
/// different voice sessions interleave freely.
pub struct AppState {
    config: AppConfig,
    nim: RwLock<NimEngine>,
    outbox: Outbox,
    relay_sse: SseHub,
    publisher: &'static str,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// Returns the receiving half of the relay queue, to be drained by the dispatcher.
    pub fn new(
        config: AppConfig,
        publisher: &'static str,
    ) -> (SharedState, mpsc::UnboundedReceiver<RelayMessage>) {
        let nim = NimEngine::new(config.lines.clone(), config.delay_secs);
        let (outbox, rx) = Outbox::new(config.topic.clone());
        let state = Arc::new(Self {
            config,
            nim: RwLock::new(nim),
            outbox,
            relay_sse: SseHub::new(RELAY_SSE_CAPACITY),
            publisher,
        });
        (state, rx)
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared NIM engine.
    pub fn nim(&self) -> &RwLock<NimEngine> {
        &self.nim
    }

    /// Queue feeding the relay dispatcher.
    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    /// Broadcast hub carrying dispatch results.
    pub fn relay_sse(&self) -> &SseHub {
        &self.relay_sse
    }

    /// Snapshot the current NIM game.
    pub async fn snapshot(&self) -> Snapshot {
        self.nim.read().await.snapshot()
    }

    /// Label of the transport relay messages are published through.
    pub fn publisher(&self) -> &'static str {
        self.publisher
    }

    /// True once the relay dispatcher has stopped.
    pub fn is_degraded(&self) -> bool {
        self.outbox.is_closed()
    }
}
