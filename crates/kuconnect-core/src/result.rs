//! Convenience result type alias for KU Connect.

use crate::error::AppError;

/// A specialized `Result` type for KU Connect operations.
pub type AppResult<T> = Result<T, AppError>;
