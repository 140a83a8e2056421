//! Chat and message entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kuconnect_core::types::{ChatId, MessageId, UserId};

/// A one-to-one chat. The pair is unordered; at most one chat exists per pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    /// Row id.
    pub id: ChatId,
    /// One member.
    #[serde(rename = "user1")]
    pub user_1: UserId,
    /// The other member.
    #[serde(rename = "user2")]
    pub user_2: UserId,
    /// When the chat was opened.
    pub created_at: DateTime<Utc>,
}

impl Chat {
    /// Whether `user` is one of the two members.
    pub fn has_member(&self, user: UserId) -> bool {
        self.user_1 == user || self.user_2 == user
    }

    /// The member that is not `user`, if `user` is a member.
    pub fn other_member(&self, user: UserId) -> Option<UserId> {
        if self.user_1 == user {
            Some(self.user_2)
        } else if self.user_2 == user {
            Some(self.user_1)
        } else {
            None
        }
    }

    /// Whether this chat joins exactly `a` and `b`, in either order.
    pub fn is_between(&self, a: UserId, b: UserId) -> bool {
        (self.user_1 == a && self.user_2 == b) || (self.user_1 == b && self.user_2 == a)
    }
}

/// A chat message. `is_read` is flipped by the member who did not write it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Row id.
    pub id: MessageId,
    /// Owning chat.
    pub chat_id: ChatId,
    /// Author.
    pub author_id: UserId,
    /// Text body.
    pub content: String,
    /// Whether the recipient has read it.
    pub is_read: bool,
    /// When it was sent.
    pub created_at: DateTime<Utc>,
}
