//! Push subscription repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::{SubscriptionId, UserId};
use kuconnect_entity::push::{NewPushSubscription, PushSubscription};

use crate::errors::map_sqlx;
use crate::store::PushSubscriptionStore;

/// Repository for browser push endpoints.
#[derive(Debug, Clone)]
pub struct PushSubscriptionRepository {
    pool: PgPool,
}

impl PushSubscriptionRepository {
    /// Create a new push subscription repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PushSubscriptionStore for PushSubscriptionRepository {
    async fn upsert(
        &self,
        user_id: UserId,
        subscription: NewPushSubscription,
    ) -> AppResult<PushSubscription> {
        sqlx::query_as::<_, PushSubscription>(
            "INSERT INTO push_subscriptions (id, user_id, endpoint, p256dh, auth, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (endpoint) DO UPDATE SET user_id = EXCLUDED.user_id, \
                 p256dh = EXCLUDED.p256dh, auth = EXCLUDED.auth, created_at = EXCLUDED.created_at \
             RETURNING id, user_id, endpoint, p256dh, auth, created_at",
        )
        .bind(SubscriptionId::new())
        .bind(user_id)
        .bind(&subscription.endpoint)
        .bind(&subscription.keys.p256dh)
        .bind(&subscription.keys.auth)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx("upsert push subscription"))
    }

    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<PushSubscription>> {
        sqlx::query_as::<_, PushSubscription>(
            "SELECT id, user_id, endpoint, p256dh, auth, created_at \
             FROM push_subscriptions WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("list push subscriptions"))
    }

    async fn delete_by_endpoint(&self, endpoint: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM push_subscriptions WHERE endpoint = $1")
            .bind(endpoint)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx("delete push subscription"))?;
        Ok(result.rows_affected() > 0)
    }
}
