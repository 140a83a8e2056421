//! Store traits, one per entity.
//!
//! Each trait exposes the parameterized operations the services need and
//! nothing more. [`Stores`] bundles one implementation of each so the
//! service layer never names a concrete backend.

pub mod chat;
pub mod interaction;
pub mod interest;
pub mod notification;
pub mod profile;
pub mod push;
pub mod settings;
pub mod user;

use std::sync::Arc;

use sqlx::PgPool;

pub use chat::ChatStore;
pub use interaction::InteractionStore;
pub use interest::InterestStore;
pub use notification::NotificationStore;
pub use profile::ProfileStore;
pub use push::PushSubscriptionStore;
pub use settings::SettingsStore;
pub use user::UserStore;

use crate::memory::MemoryStore;
use crate::repositories::{
    ChatRepository, InteractionRepository, InterestRepository, NotificationRepository,
    ProfileRepository, PushSubscriptionRepository, SettingsRepository, UserRepository,
};

/// One implementation of every store trait.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Account lookups.
    pub users: Arc<dyn UserStore>,
    /// Interest catalog and user picks.
    pub interests: Arc<dyn InterestStore>,
    /// Profiles, embeddings and ranking.
    pub profiles: Arc<dyn ProfileStore>,
    /// Like/dislike ledger.
    pub interactions: Arc<dyn InteractionStore>,
    /// Privacy and notification settings.
    pub settings: Arc<dyn SettingsStore>,
    /// Persisted notifications.
    pub notifications: Arc<dyn NotificationStore>,
    /// Web-push endpoints.
    pub push_subscriptions: Arc<dyn PushSubscriptionStore>,
    /// Chats and messages.
    pub chats: Arc<dyn ChatStore>,
}

impl Stores {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            interests: Arc::new(InterestRepository::new(pool.clone())),
            profiles: Arc::new(ProfileRepository::new(pool.clone())),
            interactions: Arc::new(InteractionRepository::new(pool.clone())),
            settings: Arc::new(SettingsRepository::new(pool.clone())),
            notifications: Arc::new(NotificationRepository::new(pool.clone())),
            push_subscriptions: Arc::new(PushSubscriptionRepository::new(pool.clone())),
            chats: Arc::new(ChatRepository::new(pool)),
        }
    }

    /// Every trait served by one shared in-memory state.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            interests: Arc::new(store.clone()),
            profiles: Arc::new(store.clone()),
            interactions: Arc::new(store.clone()),
            settings: Arc::new(store.clone()),
            notifications: Arc::new(store.clone()),
            push_subscriptions: Arc::new(store.clone()),
            chats: Arc::new(store),
        }
    }
}
