//! Profile lifecycle events.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Events raised by the profile service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProfileEvent {
    /// A user finished creating their profile.
    Created {
        /// The owner.
        user_id: UserId,
        /// Display name chosen at creation.
        display_name: String,
    },
}
