//! Settings handlers.

use axum::Json;
use axum::extract::State;

use kuconnect_entity::settings::{Settings, SettingsPatch};

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/settings/me
pub async fn get_settings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Settings>> {
    Ok(Json(state.settings_service.get(&auth).await?))
}

/// PATCH /api/settings/me
pub async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(patch): Json<SettingsPatch>,
) -> ApiResult<Json<Settings>> {
    Ok(Json(state.settings_service.update(&auth, patch).await?))
}
