//! Web-push subscription registry.

use async_trait::async_trait;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::UserId;
use kuconnect_entity::push::{NewPushSubscription, PushSubscription};

/// Browser push endpoints per user.
#[async_trait]
pub trait PushSubscriptionStore: Send + Sync + std::fmt::Debug {
    /// Register an endpoint, replacing any row with the same endpoint.
    async fn upsert(
        &self,
        user_id: UserId,
        subscription: NewPushSubscription,
    ) -> AppResult<PushSubscription>;

    /// Every endpoint registered by a user.
    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<PushSubscription>>;

    /// Forget an endpoint the push service reported as gone.
    async fn delete_by_endpoint(&self, endpoint: &str) -> AppResult<bool>;
}
