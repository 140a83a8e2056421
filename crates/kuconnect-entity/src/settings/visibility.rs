//! Visibility levels for profile and contact information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who may see a piece of profile information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "visibility", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Only the owner.
    Private,
    /// The owner and mutually connected users.
    Connected,
    /// Everyone.
    Public,
}

impl Visibility {
    /// Whether a viewer with the given relationship may see the guarded data.
    pub fn permits(&self, is_owner: bool, is_connected: bool) -> bool {
        match self {
            Self::Public => true,
            Self::Connected => is_owner || is_connected,
            Self::Private => is_owner,
        }
    }

    /// Return the visibility as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Connected => "connected",
            Self::Public => "public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = kuconnect_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "private" => Ok(Self::Private),
            "connected" => Ok(Self::Connected),
            "public" => Ok(Self::Public),
            _ => Err(kuconnect_core::AppError::validation(format!(
                "Invalid visibility: '{s}'. Expected one of: private, connected, public"
            ))),
        }
    }
}
