//! Inbound and outbound WebSocket frame definitions.
//!
//! Every frame is a JSON object tagged by `type` in snake_case; payload
//! fields are camelCase.

use serde::{Deserialize, Serialize};

use kuconnect_core::error::AppError;
use kuconnect_core::types::{ChatId, MessageId};
use kuconnect_entity::chat::Message;
use kuconnect_entity::notification::Notification;

/// Frames sent by the client to the server.
///
/// The acting user is always the connection's user; no frame carries one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum InboundMessage {
    /// Start receiving a chat's messages and read receipts.
    JoinChat {
        /// Chat to join.
        chat_id: ChatId,
    },
    /// Stop receiving a chat's traffic.
    LeaveChat {
        /// Chat to leave.
        chat_id: ChatId,
    },
    /// Post a message to a chat.
    SendMessage {
        /// Target chat.
        chat_id: ChatId,
        /// Message body.
        content: String,
    },
    /// Mark every peer message in a chat read.
    MarkAsRead {
        /// The chat.
        chat_id: ChatId,
    },
    /// Application-level keepalive.
    Ping,
}

/// Frames sent by the server to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum OutboundMessage {
    /// A new message in a joined chat.
    ReceiveMessage {
        /// The stored message.
        message: Message,
    },
    /// One message in a joined chat was read by its recipient.
    ReadMessage {
        /// The chat.
        chat_id: ChatId,
        /// The message now read.
        message_id: MessageId,
    },
    /// Notification delivery.
    Notification {
        /// The stored notification.
        notification: Notification,
    },
    /// Join confirmed.
    Joined {
        /// The chat joined.
        chat_id: ChatId,
    },
    /// Leave confirmed.
    Left {
        /// The chat left.
        chat_id: ChatId,
    },
    /// Reply to `ping`.
    Pong,
    /// A frame could not be handled.
    Error {
        /// Error code.
        code: String,
        /// Error description.
        message: String,
    },
}

impl OutboundMessage {
    /// Error frame for a failed operation.
    pub fn error(err: &AppError) -> Self {
        Self::Error {
            code: err.kind.to_string(),
            message: err.message.clone(),
        }
    }
}
