//! User account reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kuconnect_core::types::UserId;

/// An account known to the auth provider. KU Connect only reads these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Account id; the `sub` claim of bearer tokens.
    pub id: UserId,
    /// Login email, if the provider shares it.
    pub email: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
