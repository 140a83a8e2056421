//! Process-local store with the same semantics as the PostgreSQL repositories.
//!
//! All state lives behind one `RwLock`. Every write operation takes the
//! write lock once, validates, then mutates, so a failed call leaves the
//! state untouched just like a rolled-back transaction.

mod account;
mod chat;
mod interaction;
mod notification;
mod profile;

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use kuconnect_core::types::{InterestId, UserId};
use kuconnect_entity::chat::{Chat, Message};
use kuconnect_entity::interaction::Interaction;
use kuconnect_entity::interest::Interest;
use kuconnect_entity::notification::Notification;
use kuconnect_entity::profile::{Embedding, Profile};
use kuconnect_entity::push::PushSubscription;
use kuconnect_entity::settings::Settings;
use kuconnect_entity::user::User;

/// Interest names seeded into a fresh catalog.
pub const DEFAULT_INTERESTS: &[&str] = &[
    "Anime",
    "Art",
    "Badminton",
    "Basketball",
    "Board Games",
    "Books",
    "Camping",
    "Coding",
    "Coffee",
    "Cooking",
    "Cycling",
    "Dancing",
    "Fashion",
    "Film",
    "Fitness",
    "Football",
    "Gaming",
    "Hiking",
    "K-Pop",
    "Languages",
    "Music",
    "Photography",
    "Running",
    "Science",
    "Startups",
    "Swimming",
    "Travel",
    "Volunteering",
    "Writing",
    "Yoga",
];

/// Tables of the in-memory backend. Vectors keep insertion order.
#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    pub(crate) users: HashMap<UserId, User>,
    pub(crate) interests: Vec<Interest>,
    pub(crate) user_interests: BTreeSet<(UserId, InterestId)>,
    pub(crate) profiles: HashMap<UserId, Profile>,
    pub(crate) embeddings: HashMap<UserId, Embedding>,
    pub(crate) settings: HashMap<UserId, Settings>,
    pub(crate) interactions: Vec<Interaction>,
    pub(crate) chats: Vec<Chat>,
    pub(crate) messages: Vec<Message>,
    pub(crate) notifications: Vec<Notification>,
    pub(crate) push_subscriptions: Vec<PushSubscription>,
}

impl MemoryState {
    pub(crate) fn interaction(&self, from: UserId, to: UserId) -> Option<&Interaction> {
        self.interactions
            .iter()
            .find(|i| i.from_user_id == from && i.to_user_id == to)
    }

    pub(crate) fn likes(&self, from: UserId, to: UserId) -> bool {
        self.interaction(from, to).is_some_and(|i| i.liked)
    }
}

/// Cloneable handle to one shared in-memory database.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    /// An empty store with no interests.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose catalog holds [`DEFAULT_INTERESTS`].
    pub fn with_default_interests() -> Self {
        let state = MemoryState {
            interests: DEFAULT_INTERESTS
                .iter()
                .map(|name| Interest {
                    id: InterestId::new(),
                    name: (*name).to_string(),
                })
                .collect(),
            ..MemoryState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Register an account, as the auth provider would.
    pub async fn insert_user(&self, id: UserId, email: Option<String>) -> User {
        let mut state = self.state.write().await;
        state
            .users
            .entry(id)
            .or_insert_with(|| User {
                id,
                email,
                created_at: Utc::now(),
            })
            .clone()
    }

    /// Look up a catalog entry by name.
    pub async fn interest_named(&self, name: &str) -> Option<Interest> {
        let state = self.state.read().await;
        state.interests.iter().find(|i| i.name == name).cloned()
    }

    /// The stored embedding of a user's profile.
    pub async fn embedding_of(&self, user_id: UserId) -> Option<Embedding> {
        self.state.read().await.embeddings.get(&user_id).cloned()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use kuconnect_entity::profile::ProfileFields;

    use crate::store::ProfileStore;

    /// Create a user with a profile and the given embedding.
    pub(crate) async fn user_with_profile(
        store: &MemoryStore,
        name: &str,
        embedding: Vec<f32>,
    ) -> UserId {
        let id = UserId::new();
        store.insert_user(id, None).await;
        let fields = ProfileFields {
            display_name: name.to_string(),
            ..ProfileFields::default()
        };
        store
            .create_profile(id, fields, &[], &Embedding::new(embedding))
            .await
            .expect("create profile");
        id
    }
}
