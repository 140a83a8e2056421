//! Shared interest catalog entry.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kuconnect_core::types::{InterestId, UserId};

/// A catalog entry such as "Photography". Seeded, never written by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Interest {
    /// Catalog id.
    pub id: InterestId,
    /// Display name, also used to build embedding prompts.
    pub name: String,
}

/// An interest tagged with the user who picked it, for batch lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserInterest {
    /// Who picked the interest.
    pub user_id: UserId,
    /// Catalog id.
    pub id: InterestId,
    /// Display name.
    pub name: String,
}

impl From<UserInterest> for Interest {
    fn from(value: UserInterest) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}
