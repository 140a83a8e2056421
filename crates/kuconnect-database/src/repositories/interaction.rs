//! Interaction repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::UserId;
use kuconnect_entity::interaction::Interaction;
use kuconnect_entity::profile::Profile;

use super::PROFILE_COLUMNS_P;
use crate::errors::map_sqlx;
use crate::store::InteractionStore;

/// Repository for the like/dislike ledger.
///
/// The `(from_user_id, to_user_id)` primary key is the only serialization
/// point between concurrent judgments of the same pair.
#[derive(Debug, Clone)]
pub struct InteractionRepository {
    pool: PgPool,
}

impl InteractionRepository {
    /// Create a new interaction repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Likers of `$1` that `$1` has not judged back.
const PENDING_FILTER: &str = "FROM interactions i \
     JOIN profiles p ON p.user_id = i.from_user_id \
     WHERE i.to_user_id = $1 AND i.liked \
       AND NOT EXISTS ( \
           SELECT 1 FROM interactions o \
           WHERE o.from_user_id = $1 AND o.to_user_id = i.from_user_id)";

#[async_trait]
impl InteractionStore for InteractionRepository {
    async fn record(&self, from: UserId, to: UserId, liked: bool) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO interactions (from_user_id, to_user_id, liked, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) \
             ON CONFLICT (from_user_id, to_user_id) DO NOTHING",
        )
        .bind(from)
        .bind(to)
        .bind(liked)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx("record interaction"))?;
        Ok(result.rows_affected() == 1)
    }

    async fn find(&self, from: UserId, to: UserId) -> AppResult<Option<Interaction>> {
        sqlx::query_as::<_, Interaction>(
            "SELECT from_user_id, to_user_id, liked, created_at, updated_at \
             FROM interactions WHERE from_user_id = $1 AND to_user_id = $2",
        )
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx("find interaction"))
    }

    async fn is_connected(&self, a: UserId, b: UserId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM interactions \
                           WHERE from_user_id = $1 AND to_user_id = $2 AND liked) \
                AND EXISTS(SELECT 1 FROM interactions \
                           WHERE from_user_id = $2 AND to_user_id = $1 AND liked)",
        )
        .bind(a)
        .bind(b)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx("check connection"))
    }

    async fn find_pending_likes(&self, user_id: UserId, limit: i64) -> AppResult<Vec<Profile>> {
        let sql = format!(
            "SELECT {PROFILE_COLUMNS_P} {PENDING_FILTER} \
             ORDER BY i.created_at DESC, i.from_user_id LIMIT $2"
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(user_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx("find pending likes"))
    }

    async fn count_pending_likes(&self, user_id: UserId) -> AppResult<i64> {
        let sql = format!("SELECT COUNT(*) {PENDING_FILTER}");
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx("count pending likes"))
    }
}
