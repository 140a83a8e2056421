//! Profile handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use kuconnect_core::types::UserId;
use kuconnect_entity::interest::Interest;
use kuconnect_entity::profile::{OwnProfile, Profile, ProfileDetail};

use crate::dto::request::{CreateProfileRequest, ProfileBody, SetInterestsRequest};
use crate::dto::response::{CandidatesResponse, CreatedResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, IdPath, Pagination, ValidatedJson};
use crate::state::AppState;

/// GET /api/profiles?page&size
pub async fn list_candidates(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<CandidatesResponse>> {
    let profiles = state.candidate_ranker.rank(&auth, page).await?;
    Ok(Json(CandidatesResponse { profiles }))
}

/// GET /api/me/profile
pub async fn get_own_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<OwnProfile>> {
    Ok(Json(state.profile_service.get_own_profile(&auth).await?))
}

/// GET /api/profiles/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<ProfileDetail>> {
    Ok(Json(state.profile_service.get_profile(&auth, user_id).await?))
}

/// POST /api/profiles
pub async fn create_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateProfileRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let profile = state
        .profile_service
        .create_profile(&auth, req.profile.into(), req.interests)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: profile.id.into_uuid(),
        }),
    ))
}

/// PUT /api/profiles
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ProfileBody>,
) -> ApiResult<Json<Profile>> {
    Ok(Json(state.profile_service.update_profile(&auth, req.into()).await?))
}

/// GET /api/profiles/me/interests
pub async fn get_interests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Interest>>> {
    Ok(Json(state.profile_service.get_interests(&auth).await?))
}

/// PUT /api/profiles/me/interests
pub async fn set_interests(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<SetInterestsRequest>,
) -> ApiResult<Json<Vec<Interest>>> {
    Ok(Json(
        state
            .profile_service
            .set_interests(&auth, req.interests)
            .await?,
    ))
}
