//! Interest catalog handler.

use axum::Json;
use axum::extract::State;

use kuconnect_entity::interest::Interest;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/interests
pub async fn list_catalog(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<Interest>>> {
    Ok(Json(state.profile_service.list_catalog().await?))
}
