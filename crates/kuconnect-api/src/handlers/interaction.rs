//! Like/dislike handlers.

use axum::Json;
use axum::extract::State;

use kuconnect_service::{InteractionOutcome, PendingLikes};

use crate::dto::request::CreateInteractionRequest;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/interactions
pub async fn create_interaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateInteractionRequest>,
) -> ApiResult<Json<InteractionOutcome>> {
    let outcome = state
        .orchestrator
        .create_interaction(&auth, req.to_user_id, req.liked)
        .await?;
    Ok(Json(outcome))
}

/// GET /api/interactions/pending
pub async fn pending_likes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<PendingLikes>> {
    Ok(Json(state.interaction_ledger.pending(&auth).await?))
}
