//! Consumes domain events and turns them into notifications.

use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use kuconnect_core::events::{
    ChatEvent, DomainEvent, EventPayload, EventReceiver, MatchingEvent, ProfileEvent,
};
use kuconnect_core::types::UserId;
use kuconnect_entity::notification::NotificationData;

use super::dispatcher::NotificationDispatcher;

/// Owns the single event receiver. Built once at startup.
#[derive(Debug)]
pub struct EventWorker {
    receiver: EventReceiver,
    dispatcher: NotificationDispatcher,
}

impl EventWorker {
    /// Creates a new worker.
    pub fn new(receiver: EventReceiver, dispatcher: NotificationDispatcher) -> Self {
        Self {
            receiver,
            dispatcher,
        }
    }

    /// Run until every publisher is dropped.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut worker = self;
            info!("Notification worker started");
            while let Some(event) = worker.receiver.recv().await {
                worker.handle(event).await;
            }
            info!("Notification worker stopped");
        })
    }

    /// Handle every event already queued and return how many there were.
    pub async fn run_pending(&mut self) -> usize {
        let events = self.receiver.drain();
        let count = events.len();
        for event in events {
            self.handle(event).await;
        }
        count
    }

    /// Map one event to its notification.
    pub async fn handle(&self, event: DomainEvent) {
        let (recipient, data) = match event.payload {
            EventPayload::Matching(MatchingEvent::InteractionLiked { to, .. }) => {
                (to, NotificationData::interaction())
            }
            EventPayload::Matching(MatchingEvent::ConnectionFormed {
                recipient,
                peer,
                peer_name,
                chat_id,
            }) => (
                recipient,
                NotificationData::new_connection(peer, &peer_name, chat_id),
            ),
            EventPayload::Chat(ChatEvent::MessageSent {
                chat_id,
                author,
                author_name,
                recipient,
                preview,
                ..
            }) => (
                recipient,
                NotificationData::new_message(chat_id, author, &author_name, &preview),
            ),
            EventPayload::Profile(ProfileEvent::Created {
                user_id,
                display_name,
            }) => (user_id, NotificationData::welcome(&display_name)),
        };
        self.deliver(event.id, recipient, data).await;
    }

    async fn deliver(&self, event_id: Uuid, recipient: UserId, data: NotificationData) {
        if let Err(e) = self.dispatcher.notify(recipient, data).await {
            warn!(
                event_id = %event_id,
                recipient = %recipient,
                error = %e,
                "Failed to dispatch notification"
            );
        }
    }
}
