use futures::{FutureExt, future::BoxFuture};
use tracing::info;

use super::{PublishResult, RelayPublisher};
use crate::state::relay::RelayMessage;

/// Publisher used when no broker endpoint is configured: every message is only logged.
#[derive(Debug, Clone, Default)]
pub struct LogPublisher;

impl RelayPublisher for LogPublisher {
    fn publish(&self, message: RelayMessage) -> BoxFuture<'static, PublishResult<()>> {
        info!(
            topic = %message.topic,
            payload = %message.payload,
            qos = message.qos,
            "relay message (no broker configured)"
        );
        futures::future::ready(Ok(())).boxed()
    }

    fn kind(&self) -> &'static str {
        "log"
    }
}
