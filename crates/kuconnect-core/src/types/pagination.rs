//! Offset pagination for list endpoints.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A validated, 1-based page request.
///
/// `offset = (page - 1) * size`. A page past the end of the data is not an
/// error; it simply yields no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: i64,
    /// Number of items per page.
    pub size: i64,
}

impl PageRequest {
    /// Validate a page request against the configured maximum size.
    pub fn try_new(page: i64, size: i64, max_size: i64) -> Result<Self, AppError> {
        if page < 1 {
            return Err(AppError::validation("page must be 1 or greater"));
        }
        if size < 1 {
            return Err(AppError::validation("size must be 1 or greater"));
        }
        if size > max_size {
            return Err(AppError::validation(format!(
                "size must not exceed {max_size}"
            )));
        }
        Ok(Self { page, size })
    }

    /// SQL `OFFSET` value.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }

    /// SQL `LIMIT` value.
    pub fn limit(&self) -> i64 {
        self.size
    }

    /// Slice an already-ordered in-memory collection the same way `LIMIT/OFFSET` would.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit()).unwrap_or(usize::MAX);
        items.into_iter().skip(offset).take(limit).collect()
    }
}
