//! Interest repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::{InterestId, UserId};
use kuconnect_entity::interest::{Interest, UserInterest};

use crate::errors::map_sqlx;
use crate::store::InterestStore;

/// Repository for the seeded catalog and the `user_interests` join.
#[derive(Debug, Clone)]
pub struct InterestRepository {
    pool: PgPool,
}

impl InterestRepository {
    /// Create a new interest repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterestStore for InterestRepository {
    async fn list_all(&self) -> AppResult<Vec<Interest>> {
        sqlx::query_as::<_, Interest>("SELECT id, name FROM interests ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx("list interests"))
    }

    async fn find_by_ids(&self, ids: &[InterestId]) -> AppResult<Vec<Interest>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Interest>(
            "SELECT id, name FROM interests WHERE id = ANY($1) ORDER BY name",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("find interests by id"))
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<Interest>> {
        sqlx::query_as::<_, Interest>(
            "SELECT i.id, i.name FROM user_interests ui \
             JOIN interests i ON i.id = ui.interest_id \
             WHERE ui.user_id = $1 ORDER BY i.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("find interests of user"))
    }

    async fn find_by_users(&self, user_ids: &[UserId]) -> AppResult<Vec<UserInterest>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, UserInterest>(
            "SELECT ui.user_id, i.id, i.name FROM user_interests ui \
             JOIN interests i ON i.id = ui.interest_id \
             WHERE ui.user_id = ANY($1) ORDER BY i.name",
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("find interests of users"))
    }
}
