//! Notification repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::{NotificationId, PageRequest, UserId};
use kuconnect_entity::notification::{NewNotification, Notification};

use crate::errors::map_sqlx;
use crate::store::NotificationStore;

const NOTIFICATION_COLUMNS: &str = "id, user_id, kind, data, read_at, created_at, updated_at";

/// Repository for persisted notifications.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn insert(&self, notification: NewNotification) -> AppResult<Notification> {
        let row = notification.into_notification(NotificationId::new(), Utc::now());
        let sql = format!(
            "INSERT INTO notifications (id, user_id, kind, data, read_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, NULL, $5, $5) RETURNING {NOTIFICATION_COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&sql)
            .bind(row.id)
            .bind(row.user_id)
            .bind(row.kind)
            .bind(Json(&row.data))
            .bind(row.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx("insert notification"))
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> AppResult<Vec<Notification>> {
        let sql = format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&sql)
            .bind(user_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx("list notifications"))
    }

    async fn mark_read(&self, user_id: UserId, ids: &[NotificationId]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE notifications SET read_at = $3, updated_at = $3 \
             WHERE id = ANY($1) AND user_id = $2 AND read_at IS NULL",
        )
        .bind(ids)
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx("mark notifications read"))?;
        Ok(result.rows_affected())
    }
}
