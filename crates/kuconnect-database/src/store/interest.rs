//! Interest catalog and per-user picks.

use async_trait::async_trait;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::{InterestId, UserId};
use kuconnect_entity::interest::{Interest, UserInterest};

/// Read access to the seeded catalog and the user/interest join.
#[async_trait]
pub trait InterestStore: Send + Sync + std::fmt::Debug {
    /// The whole catalog, ordered by name.
    async fn list_all(&self) -> AppResult<Vec<Interest>>;

    /// Catalog entries for the given ids. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[InterestId]) -> AppResult<Vec<Interest>>;

    /// Interests picked by one user, ordered by name.
    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<Interest>>;

    /// Interests picked by any of the given users.
    async fn find_by_users(&self, user_ids: &[UserId]) -> AppResult<Vec<UserInterest>>;
}
