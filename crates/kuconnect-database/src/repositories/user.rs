//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::UserId;
use kuconnect_entity::user::User;

use crate::errors::map_sqlx;
use crate::store::UserStore;

/// Repository for mirrored account rows.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT id, email, created_at FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx("find user by id"))
    }

    async fn exists(&self, id: UserId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx("check user existence"))
    }

    async fn upsert(&self, id: UserId, email: Option<String>) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, created_at) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET email = COALESCE(EXCLUDED.email, users.email) \
             RETURNING id, email, created_at",
        )
        .bind(id)
        .bind(email)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx("upsert user"))
    }
}
