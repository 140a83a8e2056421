//! Settings read and partial update.

use std::sync::Arc;

use tracing::info;

use kuconnect_core::error::AppError;
use kuconnect_core::result::AppResult;
use kuconnect_database::store::SettingsStore;
use kuconnect_entity::settings::{Settings, SettingsPatch};

use crate::context::RequestContext;

/// The caller's settings row.
#[derive(Debug, Clone)]
pub struct SettingsService {
    settings: Arc<dyn SettingsStore>,
}

impl SettingsService {
    /// Creates a new settings service.
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// The caller's settings. Exists once the caller has a profile.
    pub async fn get(&self, ctx: &RequestContext) -> AppResult<Settings> {
        self.settings
            .find_by_user(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Settings not found, create a profile first"))
    }

    /// Apply a partial update to the caller's settings.
    pub async fn update(&self, ctx: &RequestContext, patch: SettingsPatch) -> AppResult<Settings> {
        if patch.is_empty() {
            return Err(AppError::validation("No settings to update"));
        }
        let settings = self
            .settings
            .update(ctx.user_id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Settings not found, create a profile first"))?;
        info!(user_id = %ctx.user_id, "Settings updated");
        Ok(settings)
    }
}
