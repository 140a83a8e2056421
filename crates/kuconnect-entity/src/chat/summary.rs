//! Chat read models.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kuconnect_core::types::{ChatId, UserId};

use super::model::Message;

/// The other member of a chat, as shown in chat lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPeer {
    /// Their user id.
    pub id: UserId,
    /// Their display name, empty if they have no profile.
    pub name: String,
    /// Their avatar.
    pub avatar: Option<String>,
}

/// Preview of the newest message in a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMessage {
    /// Message body.
    pub content: String,
    /// When it was sent.
    pub created_at: DateTime<Utc>,
}

/// One entry of the caller's chat list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    /// The chat.
    pub chat_id: ChatId,
    /// The other member.
    pub peer: ChatPeer,
    /// Newest message, if any.
    pub last_message: Option<LastMessage>,
    /// Messages from the peer the caller has not read.
    pub unread_count: i64,
}

impl ChatSummary {
    /// Most recent activity first; chats without messages after every chat with one.
    pub fn by_recency(a: &ChatSummary, b: &ChatSummary) -> Ordering {
        match (&a.last_message, &b.last_message) {
            (Some(x), Some(y)) => y.created_at.cmp(&x.created_at),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// A chat opened by one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatDetail {
    /// The chat.
    pub chat_id: ChatId,
    /// The other member.
    pub target: ChatPeer,
    /// Every message, oldest first.
    pub messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn summary(at: Option<DateTime<Utc>>) -> ChatSummary {
        ChatSummary {
            chat_id: ChatId::new(),
            peer: ChatPeer {
                id: UserId::new(),
                name: String::new(),
                avatar: None,
            },
            last_message: at.map(|created_at| LastMessage {
                content: "hi".to_string(),
                created_at,
            }),
            unread_count: 0,
        }
    }

    #[test]
    fn test_empty_chats_sort_last() {
        let now = Utc::now();
        let mut list = vec![
            summary(None),
            summary(Some(now - Duration::minutes(5))),
            summary(Some(now)),
        ];
        list.sort_by(ChatSummary::by_recency);
        assert_eq!(list[0].last_message.as_ref().map(|m| m.created_at), Some(now));
        assert!(list[2].last_message.is_none());
    }
}
