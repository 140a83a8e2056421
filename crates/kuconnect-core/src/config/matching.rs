//! Candidate ranking and pagination settings.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Candidate ranking and pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Page size used when a list request omits `size`.
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,
    /// Largest accepted `size`.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,
    /// How many pending likers the pending summary shows.
    #[serde(default = "default_pending_preview_limit")]
    pub pending_preview_limit: i64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            pending_preview_limit: default_pending_preview_limit(),
        }
    }
}

impl MatchingConfig {
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.default_page_size <= 0 {
            return Err(AppError::configuration(
                "matching.default_page_size must be positive",
            ));
        }
        if self.max_page_size < self.default_page_size {
            return Err(AppError::configuration(
                "matching.max_page_size must be at least matching.default_page_size",
            ));
        }
        if self.pending_preview_limit <= 0 {
            return Err(AppError::configuration(
                "matching.pending_preview_limit must be positive",
            ));
        }
        Ok(())
    }
}

fn default_page_size() -> i64 {
    10
}

fn default_max_page_size() -> i64 {
    100
}

fn default_pending_preview_limit() -> i64 {
    5
}
