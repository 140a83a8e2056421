//! Interaction entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kuconnect_core::types::UserId;

/// One user's judgment of another. At most one per ordered pair, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    /// Who judged.
    pub from_user_id: UserId,
    /// Who was judged.
    pub to_user_id: UserId,
    /// `true` for like, `false` for dislike.
    pub liked: bool,
    /// When the judgment was recorded.
    pub created_at: DateTime<Utc>,
    /// Mirrors `created_at`; the ledger never updates rows.
    pub updated_at: DateTime<Utc>,
}
