//! Typed id path parameter.

use std::str::FromStr;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use kuconnect_core::error::AppError;

use crate::error::ApiError;

/// A single `{id}` path segment parsed into a typed identifier.
///
/// A malformed id is a `Validation` error rendered like every other error.
#[derive(Debug, Clone, Copy)]
pub struct IdPath<T>(pub T);

impl<T, S> FromRequestParts<S> for IdPath<T>
where
    T: FromStr + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        let id = raw
            .parse::<T>()
            .map_err(|_| AppError::validation(format!("Invalid id: {raw}")))?;
        Ok(Self(id))
    }
}
