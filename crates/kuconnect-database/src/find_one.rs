//! Typed single-row lookup results.

use tracing::error;

use kuconnect_core::error::AppError;
use kuconnect_core::result::AppResult;

/// Outcome of a query that should match at most one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindOne<T> {
    /// Exactly one row matched.
    Found(T),
    /// No row matched.
    NotFound,
    /// More than one row matched. A uniqueness invariant is broken.
    MultipleMatches(usize),
}

impl<T> FindOne<T> {
    /// Classify the rows returned by a query.
    pub fn from_rows(mut rows: Vec<T>) -> Self {
        match rows.len() {
            0 => Self::NotFound,
            1 => match rows.pop() {
                Some(row) => Self::Found(row),
                None => Self::NotFound,
            },
            n => Self::MultipleMatches(n),
        }
    }

    /// Collapse into an `Option`, turning multiple matches into an internal error.
    pub fn into_option(self, what: &str) -> AppResult<Option<T>> {
        match self {
            Self::Found(row) => Ok(Some(row)),
            Self::NotFound => Ok(None),
            Self::MultipleMatches(n) => {
                error!(entity = what, rows = n, "Uniqueness invariant violated");
                Err(AppError::internal(format!(
                    "Expected at most one {what}, found {n}"
                )))
            }
        }
    }

    /// Whether a row was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}
