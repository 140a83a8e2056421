//! Mapping from sqlx failures to application errors.

use kuconnect_core::error::{AppError, ErrorKind};

/// Map a sqlx error raised while doing `action`.
///
/// Constraint violations become client errors; everything else is a
/// database error carrying the original cause.
pub(crate) fn map_sqlx(action: &str) -> impl FnOnce(sqlx::Error) -> AppError + '_ {
    move |e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.constraint() == Some("profiles_user_id_key") {
                return AppError::conflict("Profile already exists");
            }
            if db_err.is_unique_violation() {
                return AppError::conflict(format!("{action}: duplicate entry"));
            }
            if db_err.is_foreign_key_violation() {
                return AppError::not_found(format!("{action}: referenced row does not exist"));
            }
            if db_err.is_check_violation() {
                return AppError::validation(format!("{action}: value out of range"));
            }
        }
        AppError::with_source(ErrorKind::Database, format!("Failed to {action}"), e)
    }
}
