//! `AuthUser` extractor: pulls the bearer token from the Authorization header and verifies it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use kuconnect_core::error::AppError;
use kuconnect_core::result::AppResult;
use kuconnect_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        Ok(AuthUser(authenticate(state, token)?))
    }
}

/// Verify `token` and build the request context it names.
pub fn authenticate(state: &AppState, token: &str) -> AppResult<RequestContext> {
    let claims = state.jwt_decoder.decode(token)?;
    Ok(RequestContext::new(claims.user_id(), claims.email))
}
