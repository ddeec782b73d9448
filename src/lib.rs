//! Library crate for relay-skill-back, exposing modules for binaries and tests.

/// Board layout and publisher endpoint configuration.
pub mod config;
/// Wire types exchanged with the voice platform and API clients.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// Transports carrying relay messages to the board.
pub mod publish;
/// HTTP route trees.
pub mod routes;
/// Request handling and background tasks.
pub mod services;
/// Shared in-memory state: the NIM game, relay queue and SSE hub.
pub mod state;
