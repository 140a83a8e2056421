//! Pagination query parameter extractor.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use kuconnect_core::config::MatchingConfig;
use kuconnect_core::error::AppError;
use kuconnect_core::result::AppResult;
use kuconnect_core::types::PageRequest;

use crate::error::ApiError;
use crate::state::AppState;

/// Raw `?page&size` query parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    pub page: Option<i64>,
    /// Items per page (default: `matching.default_page_size`).
    pub size: Option<i64>,
}

impl PaginationParams {
    /// Apply defaults and bounds from the matching configuration.
    pub fn into_page_request(self, config: &MatchingConfig) -> AppResult<PageRequest> {
        PageRequest::try_new(
            self.page.unwrap_or(1),
            self.size.unwrap_or(config.default_page_size),
            config.max_page_size,
        )
    }
}

/// A validated page request.
#[derive(Debug, Clone, Copy)]
pub struct Pagination(pub PageRequest);

impl FromRequestParts<AppState> for Pagination {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::validation(e.body_text()))?;
        Ok(Self(params.into_page_request(&state.config.matching)?))
    }
}
