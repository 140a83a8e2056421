//! Chat events.

use serde::{Deserialize, Serialize};

use crate::types::{ChatId, MessageId, UserId};

/// Events raised by the chat service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChatEvent {
    /// A message was appended to a chat.
    MessageSent {
        /// The chat.
        chat_id: ChatId,
        /// The stored message.
        message_id: MessageId,
        /// The author.
        author: UserId,
        /// Author display name.
        author_name: String,
        /// The other member of the chat.
        recipient: UserId,
        /// Truncated message content.
        preview: String,
    },
}
