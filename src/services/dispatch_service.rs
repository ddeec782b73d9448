use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    dto::sse::{RelayDispatchedEvent, ServerEvent},
    publish::RelayPublisher,
    state::{SseHub, relay::RelayMessage},
};

const EVENT_RELAY_PUBLISHED: &str = "relay.published";
const EVENT_RELAY_FAILED: &str = "relay.failed";

/// Drain the relay queue, publishing each message once and in order.
///
/// Failures are logged and broadcast, never retried. Returns when every
/// [`Outbox`](crate::state::Outbox) has been dropped.
pub async fn run(
    publisher: Arc<dyn RelayPublisher>,
    mut rx: mpsc::UnboundedReceiver<RelayMessage>,
    hub: SseHub,
) {
    info!(publisher = publisher.kind(), "relay dispatcher started");

    while let Some(message) = rx.recv().await {
        let outcome = publisher.publish(message.clone()).await;

        let error = match outcome {
            Ok(()) => {
                debug!(topic = %message.topic, payload = %message.payload, "relay message published");
                None
            }
            Err(err) => {
                warn!(
                    topic = %message.topic,
                    payload = %message.payload,
                    error = %err,
                    "relay publish failed; dropping message"
                );
                Some(err.to_string())
            }
        };

        broadcast_dispatched(&hub, message, error);
    }

    info!("relay dispatcher stopped");
}

fn broadcast_dispatched(hub: &SseHub, message: RelayMessage, error: Option<String>) {
    let name = if error.is_some() {
        EVENT_RELAY_FAILED
    } else {
        EVENT_RELAY_PUBLISHED
    };
    let payload = RelayDispatchedEvent {
        topic: message.topic,
        payload: message.payload,
        qos: message.qos,
        error,
    };

    match ServerEvent::json(Some(name.to_string()), &payload) {
        Ok(event) => hub.broadcast(event),
        Err(err) => warn!(error = %err, event = name, "failed to serialize relay event"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use futures::{FutureExt, future::BoxFuture};

    use super::*;
    use crate::{
        publish::{PublishError, PublishResult},
        state::{Outbox, relay::RelayCommand},
    };

    /// Records every payload and rejects the ones listed in `reject`.
    #[derive(Default)]
    struct RecordingPublisher {
        seen: Mutex<Vec<String>>,
        reject: Vec<&'static str>,
    }

    impl RelayPublisher for RecordingPublisher {
        fn publish(&self, message: RelayMessage) -> BoxFuture<'static, PublishResult<()>> {
            self.seen.lock().unwrap().push(message.payload.clone());
            let result = if self.reject.contains(&message.payload.as_str()) {
                Err(PublishError::Rejected {
                    topic: message.topic,
                    status: 503,
                })
            } else {
                Ok(())
            };
            futures::future::ready(result).boxed()
        }

        fn kind(&self) -> &'static str {
            "recording"
        }
    }

    #[tokio::test]
    async fn publishes_in_order_and_survives_failures() {
        let publisher = Arc::new(RecordingPublisher {
            reject: vec!["30 off 2"],
            ..Default::default()
        });
        let hub = SseHub::new(8);
        let mut events = hub.subscribe();
        let (outbox, rx) = Outbox::new("led");

        outbox.send_all(&[
            RelayCommand::switch_off(31, None),
            RelayCommand::switch_off(30, Some(2)),
            RelayCommand::switch_off(29, None),
        ]);
        drop(outbox);

        run(publisher.clone(), rx, hub).await;

        assert_eq!(
            *publisher.seen.lock().unwrap(),
            ["31 off", "30 off 2", "29 off"]
        );

        let names: Vec<_> = std::iter::from_fn(|| events.try_recv().ok())
            .map(|event| event.event.unwrap_or_default())
            .collect();
        assert_eq!(
            names,
            [EVENT_RELAY_PUBLISHED, EVENT_RELAY_FAILED, EVENT_RELAY_PUBLISHED]
        );
    }
}
