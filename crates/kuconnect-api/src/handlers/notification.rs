//! Notification handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use kuconnect_entity::notification::Notification;
use kuconnect_entity::push::PushSubscription;

use crate::dto::request::{MarkReadRequest, SubscribeRequest};
use crate::dto::response::UpdatedResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::state::AppState;

/// GET /api/notifications?page&size
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<Vec<Notification>>> {
    Ok(Json(state.notification_service.list(&auth, page).await?))
}

/// POST /api/notifications/subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<SubscribeRequest>,
) -> ApiResult<(StatusCode, Json<PushSubscription>)> {
    let subscription = state
        .notification_service
        .subscribe(&auth, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

/// PATCH /api/notifications/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<MarkReadRequest>,
) -> ApiResult<Json<UpdatedResponse>> {
    let updated = state
        .notification_service
        .mark_read(&auth, &req.notification_ids)
        .await?;
    Ok(Json(UpdatedResponse { updated }))
}
