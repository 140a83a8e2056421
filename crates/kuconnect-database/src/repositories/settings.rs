//! Settings repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::UserId;
use kuconnect_entity::settings::{Settings, SettingsPatch};

use crate::errors::map_sqlx;
use crate::store::SettingsStore;

const SETTINGS_COLUMNS: &str = "user_id, profile_visibility, contact_info_visibility, \
     noti_new_message, noti_new_connection_request, noti_new_connection_request_accept, \
     created_at, updated_at";

/// Repository for per-user settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Create a new settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for SettingsRepository {
    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Settings>> {
        let sql = format!("SELECT {SETTINGS_COLUMNS} FROM settings WHERE user_id = $1");
        sqlx::query_as::<_, Settings>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx("find settings"))
    }

    async fn update(&self, user_id: UserId, patch: SettingsPatch) -> AppResult<Option<Settings>> {
        let sql = format!(
            "UPDATE settings SET \
                profile_visibility = COALESCE($2, profile_visibility), \
                contact_info_visibility = COALESCE($3, contact_info_visibility), \
                noti_new_message = COALESCE($4, noti_new_message), \
                noti_new_connection_request = COALESCE($5, noti_new_connection_request), \
                noti_new_connection_request_accept = \
                    COALESCE($6, noti_new_connection_request_accept), \
                updated_at = $7 \
             WHERE user_id = $1 RETURNING {SETTINGS_COLUMNS}"
        );
        sqlx::query_as::<_, Settings>(&sql)
            .bind(user_id)
            .bind(patch.profile_visibility)
            .bind(patch.contact_info_visibility)
            .bind(patch.noti_new_message)
            .bind(patch.noti_new_connection_request)
            .bind(patch.noti_new_connection_request_accept)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx("update settings"))
    }
}
