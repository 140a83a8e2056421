//! Room identifiers.

use std::fmt;

use kuconnect_core::types::{ChatId, UserId};

/// Typed room identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    /// Every connection of one user. Joined automatically.
    User(UserId),
    /// Connections that opened one chat.
    Chat(ChatId),
}

impl Room {
    /// Parses `user:{uuid}` or `chat:{uuid}`.
    pub fn parse(room: &str) -> Option<Self> {
        let (kind, id) = room.split_once(':')?;
        match kind {
            "user" => id.parse().ok().map(Room::User),
            "chat" => id.parse().ok().map(Room::Chat),
            _ => None,
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Room::User(id) => write!(f, "user:{id}"),
            Room::Chat(id) => write!(f, "chat:{id}"),
        }
    }
}
