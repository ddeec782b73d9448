use tokio::sync::mpsc;
use tracing::warn;

use crate::state::relay::{RelayCommand, RelayMessage};

/// Sending half of the relay queue; handlers enqueue and never wait for delivery.
#[derive(Clone)]
pub struct Outbox {
    topic: String,
    tx: mpsc::UnboundedSender<RelayMessage>,
}

impl Outbox {
    /// Create an outbox addressing `topic` and the receiver the dispatcher drains.
    pub fn new(topic: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<RelayMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                topic: topic.into(),
                tx,
            },
            rx,
        )
    }

    /// Queue one command. A closed dispatcher is logged and otherwise ignored.
    pub fn send(&self, command: &RelayCommand) {
        let message = RelayMessage::new(self.topic.as_str(), command);
        if let Err(err) = self.tx.send(message) {
            warn!(payload = %err.0.payload, "relay dispatcher gone; dropping message");
        }
    }

    /// Queue commands in order.
    pub fn send_all<'a>(&self, commands: impl IntoIterator<Item = &'a RelayCommand>) {
        commands.into_iter().for_each(|command| self.send(command));
    }

    /// True once the dispatcher has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::relay::Switch;

    #[test]
    fn queued_messages_keep_order() {
        let (outbox, mut rx) = Outbox::new("led");
        outbox.send_all(&[
            RelayCommand::switch_off(31, None),
            RelayCommand::All(Switch::On),
        ]);

        assert_eq!(rx.try_recv().unwrap().payload, "31 off");
        let second = rx.try_recv().unwrap();
        assert_eq!(second.payload, "on");
        assert_eq!(second.topic, "led");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_receiver_does_not_panic() {
        let (outbox, rx) = Outbox::new("led");
        drop(rx);
        assert!(outbox.is_closed());
        outbox.send(&RelayCommand::All(Switch::Off));
    }
}
