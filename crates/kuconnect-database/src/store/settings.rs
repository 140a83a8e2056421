//! Per-user settings.

use async_trait::async_trait;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::UserId;
use kuconnect_entity::settings::{Settings, SettingsPatch};

/// Settings rows are created with the profile; this trait reads and patches them.
#[async_trait]
pub trait SettingsStore: Send + Sync + std::fmt::Debug {
    /// Settings of one user.
    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Settings>>;

    /// Apply a partial update. `None` when the user has no settings row.
    async fn update(&self, user_id: UserId, patch: SettingsPatch) -> AppResult<Option<Settings>>;
}
