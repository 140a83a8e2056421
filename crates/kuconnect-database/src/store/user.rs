//! Account lookups.

use async_trait::async_trait;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::UserId;
use kuconnect_entity::user::User;

/// Read access to accounts provisioned by the auth provider.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    /// Find an account by id.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Whether an account with this id exists.
    async fn exists(&self, id: UserId) -> AppResult<bool>;

    /// Mirror an account row, keeping the first `created_at`.
    async fn upsert(&self, id: UserId, email: Option<String>) -> AppResult<User>;
}
