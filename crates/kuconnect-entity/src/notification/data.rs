//! Typed notification payloads.

use serde::{Deserialize, Serialize};

use kuconnect_core::types::{ChatId, UserId};

use super::kind::NotificationKind;

/// Payload stored in `notifications.data`, one shape per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationData {
    /// Anonymous "someone likes you".
    #[serde(rename_all = "camelCase")]
    Interaction {
        /// Headline.
        title: String,
        /// Body text.
        message: String,
    },
    /// A mutual connection, personalised for the recipient.
    #[serde(rename_all = "camelCase")]
    NewConnection {
        /// Headline.
        title: String,
        /// Body text naming the peer.
        message: String,
        /// The other party.
        peer_id: UserId,
        /// The other party's display name.
        peer_name: String,
        /// The pair's chat.
        chat_id: ChatId,
    },
    /// A chat message from the other member.
    #[serde(rename_all = "camelCase")]
    NewMessage {
        /// Headline naming the author.
        title: String,
        /// Message preview.
        message: String,
        /// The chat.
        chat_id: ChatId,
        /// The author.
        author_id: UserId,
    },
    /// Sent once after profile creation.
    #[serde(rename_all = "camelCase")]
    Welcome {
        /// Headline.
        title: String,
        /// Body text.
        message: String,
    },
}

impl NotificationData {
    /// Anonymous like notice.
    pub fn interaction() -> Self {
        Self::Interaction {
            title: "Someone Likes You! 💌".to_string(),
            message: "Explore your connections to find out who.".to_string(),
        }
    }

    /// Connection notice for one recipient.
    pub fn new_connection(peer_id: UserId, peer_name: &str, chat_id: ChatId) -> Self {
        Self::NewConnection {
            title: "It's a Match! 🎉".to_string(),
            message: format!("You are now connected with {peer_name}."),
            peer_id,
            peer_name: peer_name.to_string(),
            chat_id,
        }
    }

    /// New message notice.
    pub fn new_message(chat_id: ChatId, author_id: UserId, author_name: &str, preview: &str) -> Self {
        Self::NewMessage {
            title: format!("New message from {author_name}"),
            message: preview.to_string(),
            chat_id,
            author_id,
        }
    }

    /// Welcome notice.
    pub fn welcome(display_name: &str) -> Self {
        Self::Welcome {
            title: format!("Welcome to KU Connect, {display_name}!"),
            message: "Add a few interests so we can find people you will click with.".to_string(),
        }
    }

    /// The kind this payload belongs to.
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Interaction { .. } => NotificationKind::Interaction,
            Self::NewConnection { .. } => NotificationKind::NewConnection,
            Self::NewMessage { .. } => NotificationKind::NewMessage,
            Self::Welcome { .. } => NotificationKind::Welcome,
        }
    }

    /// Headline, used for web-push.
    pub fn title(&self) -> &str {
        match self {
            Self::Interaction { title, .. }
            | Self::NewConnection { title, .. }
            | Self::NewMessage { title, .. }
            | Self::Welcome { title, .. } => title,
        }
    }

    /// Body text, used for web-push.
    pub fn message(&self) -> &str {
        match self {
            Self::Interaction { message, .. }
            | Self::NewConnection { message, .. }
            | Self::NewMessage { message, .. }
            | Self::Welcome { message, .. } => message,
        }
    }
}
