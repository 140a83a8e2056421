//! Notification kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// Someone liked the recipient.
    Interaction,
    /// A like became mutual.
    NewConnection,
    /// A chat message arrived.
    NewMessage,
    /// The recipient just created their profile.
    Welcome,
}

impl NotificationKind {
    /// Return the kind as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interaction => "INTERACTION",
            Self::NewConnection => "NEW_CONNECTION",
            Self::NewMessage => "NEW_MESSAGE",
            Self::Welcome => "WELCOME",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
