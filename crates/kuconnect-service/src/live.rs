//! Live session delivery seam.

use kuconnect_core::types::{ChatId, MessageId, UserId};
use kuconnect_entity::chat::Message;
use kuconnect_entity::notification::Notification;

/// Fire-and-forget delivery to connected clients.
///
/// Implementations return how many connections the frame was queued on.
/// Zero is normal when nobody is online; nothing is buffered or retried.
pub trait LiveChannel: Send + Sync + std::fmt::Debug {
    /// Send a notification to every connection of `user_id`.
    fn push_notification(&self, user_id: UserId, notification: &Notification) -> usize;

    /// Send a new message to every connection that joined the chat room.
    fn push_message(&self, chat_id: ChatId, message: &Message) -> usize;

    /// Send one read receipt per message to the chat room.
    fn push_read_receipts(&self, chat_id: ChatId, message_ids: &[MessageId]) -> usize;
}
