//! Persisted notifications.

use async_trait::async_trait;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::{NotificationId, PageRequest, UserId};
use kuconnect_entity::notification::{NewNotification, Notification};

/// Append-only notification log with a read marker.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug {
    /// Append one notification.
    async fn insert(&self, notification: NewNotification) -> AppResult<Notification>;

    /// One page of a user's notifications, newest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> AppResult<Vec<Notification>>;

    /// Set `read_at` on the listed notifications owned by `user_id`.
    ///
    /// Ids belonging to other users are ignored. Returns the number updated.
    async fn mark_read(&self, user_id: UserId, ids: &[NotificationId]) -> AppResult<u64>;
}
