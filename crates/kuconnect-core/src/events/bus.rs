//! In-process typed event bus.
//!
//! Publishers hold a cloneable [`EventBus`]; exactly one [`EventReceiver`]
//! exists and is handed to the consumer constructed at startup. Publishing
//! never waits on the consumer.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{DomainEvent, EventPayload};
use crate::types::UserId;

/// Sending half of the event bus.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: mpsc::UnboundedSender<DomainEvent>,
}

/// Receiving half of the event bus.
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<DomainEvent>,
}

impl EventBus {
    /// Create a connected bus/receiver pair.
    pub fn channel() -> (Self, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, EventReceiver { rx })
    }

    /// Publish an event. A bus whose receiver is gone drops the event with a warning.
    pub fn publish(&self, actor_id: UserId, payload: impl Into<EventPayload>) {
        let event = DomainEvent::new(actor_id, payload.into());
        let event_id = event.id;
        match self.tx.send(event) {
            Ok(()) => debug!(event_id = %event_id, actor_id = %actor_id, "Domain event published"),
            Err(_) => warn!(
                event_id = %event_id,
                actor_id = %actor_id,
                "Event bus closed, dropping domain event"
            ),
        }
    }
}

impl EventReceiver {
    /// Wait for the next event. `None` once every publisher is dropped.
    pub async fn recv(&mut self) -> Option<DomainEvent> {
        self.rx.recv().await
    }

    /// Take every event already queued without waiting.
    pub fn drain(&mut self) -> Vec<DomainEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MatchingEvent;

    #[tokio::test]
    async fn test_publish_then_receive_in_order() {
        let (bus, mut receiver) = EventBus::channel();
        let a = UserId::new();
        let b = UserId::new();

        bus.publish(a, MatchingEvent::InteractionLiked { from: a, to: b });
        bus.publish(b, MatchingEvent::InteractionLiked { from: b, to: a });

        let first = receiver.recv().await.expect("first event");
        assert_eq!(first.actor_id, a);
        let rest = receiver.drain();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].actor_id, b);
    }

    #[tokio::test]
    async fn test_publish_after_receiver_dropped_does_not_panic() {
        let (bus, receiver) = EventBus::channel();
        drop(receiver);
        let a = UserId::new();
        bus.publish(a, MatchingEvent::InteractionLiked { from: a, to: UserId::new() });
    }

    #[tokio::test]
    async fn test_recv_ends_when_publishers_drop() {
        let (bus, mut receiver) = EventBus::channel();
        drop(bus);
        assert!(receiver.recv().await.is_none());
    }
}
