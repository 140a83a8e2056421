//! Domain events emitted by KU Connect operations.
//!
//! Events travel over the in-process [`EventBus`] and are consumed by the
//! notification worker built at startup.

pub mod bus;
pub mod chat;
pub mod matching;
pub mod profile;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use bus::{EventBus, EventReceiver};
pub use chat::ChatEvent;
pub use matching::MatchingEvent;
pub use profile::ProfileEvent;

use crate::types::UserId;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user whose request caused the event.
    pub actor_id: UserId,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// Likes and connections.
    Matching(MatchingEvent),
    /// Chat traffic.
    Chat(ChatEvent),
    /// Profile lifecycle.
    Profile(ProfileEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: UserId, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }
}

impl From<MatchingEvent> for EventPayload {
    fn from(event: MatchingEvent) -> Self {
        Self::Matching(event)
    }
}

impl From<ChatEvent> for EventPayload {
    fn from(event: ChatEvent) -> Self {
        Self::Chat(event)
    }
}

impl From<ProfileEvent> for EventPayload {
    fn from(event: ProfileEvent) -> Self {
        Self::Profile(event)
    }
}
