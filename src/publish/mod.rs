/// Broker HTTP bridge publisher.
#[cfg(feature = "http-publish")]
pub mod http;
/// Logging-only publisher.
pub mod log;

use std::error::Error;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::state::relay::RelayMessage;

/// Result alias for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// Error raised by publish transports regardless of the underlying broker.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The request never reached the broker or the client failed.
    #[error("publish to `{topic}` failed: {message}")]
    Transport {
        /// Topic the message was addressed to.
        topic: String,
        /// What was being attempted.
        message: String,
        /// Underlying transport error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The broker answered with a non-success status.
    #[error("broker rejected publish to `{topic}` with status {status}")]
    Rejected {
        /// Topic the message was addressed to.
        topic: String,
        /// HTTP status returned by the broker.
        status: u16,
    },
}

impl PublishError {
    /// Construct a transport error from any backend failure.
    pub fn transport(
        topic: impl Into<String>,
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        PublishError::Transport {
            topic: topic.into(),
            message: message.into(),
            source: Box::new(source),
        }
    }
}

/// Abstraction over the one-way channel to the board.
///
/// Implementations deliver at most once and never report back beyond the returned error.
pub trait RelayPublisher: Send + Sync {
    /// Hand `message` to the broker once.
    fn publish(&self, message: RelayMessage) -> BoxFuture<'static, PublishResult<()>>;
    /// Short label used in logs and health output.
    fn kind(&self) -> &'static str;
}
