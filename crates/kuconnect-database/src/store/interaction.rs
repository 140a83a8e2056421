//! The directed like/dislike ledger.

use async_trait::async_trait;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::UserId;
use kuconnect_entity::interaction::Interaction;
use kuconnect_entity::profile::Profile;

/// Interaction facts and the state derived from them.
#[async_trait]
pub trait InteractionStore: Send + Sync + std::fmt::Debug {
    /// Record a judgment. Returns `false` when the ordered pair already
    /// had one, in which case nothing changes.
    async fn record(&self, from: UserId, to: UserId, liked: bool) -> AppResult<bool>;

    /// The judgment `from` made about `to`.
    async fn find(&self, from: UserId, to: UserId) -> AppResult<Option<Interaction>>;

    /// Whether both directions are recorded as likes.
    async fn is_connected(&self, a: UserId, b: UserId) -> AppResult<bool>;

    /// Profiles of users who liked `user_id` and whom `user_id` has not judged.
    async fn find_pending_likes(&self, user_id: UserId, limit: i64) -> AppResult<Vec<Profile>>;

    /// Number of pending likers, same filter without a limit.
    async fn count_pending_likes(&self, user_id: UserId) -> AppResult<i64>;
}
