//! Chats and messages.

use async_trait::async_trait;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::{ChatId, MessageId, UserId};
use kuconnect_entity::chat::{Chat, Message};

/// One-to-one chats. At most one chat exists per unordered pair.
#[async_trait]
pub trait ChatStore: Send + Sync + std::fmt::Debug {
    /// The chat between `a` and `b`, in either order.
    async fn find_between(&self, a: UserId, b: UserId) -> AppResult<Option<Chat>>;

    /// The chat between `a` and `b`, created if missing. Safe under concurrent callers.
    ///
    /// The flag is `true` only for the one call that inserted the row.
    async fn find_or_create(&self, a: UserId, b: UserId) -> AppResult<(Chat, bool)>;

    /// A chat by id.
    async fn find_by_id(&self, id: ChatId) -> AppResult<Option<Chat>>;

    /// Every chat the user is a member of.
    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<Chat>>;

    /// Append a message.
    async fn insert_message(
        &self,
        chat_id: ChatId,
        author_id: UserId,
        content: &str,
    ) -> AppResult<Message>;

    /// All messages of a chat, oldest first.
    async fn messages(&self, chat_id: ChatId) -> AppResult<Vec<Message>>;

    /// The newest message of a chat.
    async fn last_message(&self, chat_id: ChatId) -> AppResult<Option<Message>>;

    /// Messages in the chat not written by `reader` and not yet read.
    async fn count_unread(&self, chat_id: ChatId, reader: UserId) -> AppResult<i64>;

    /// Mark every unread message not written by `reader` as read.
    ///
    /// Returns the ids that flipped, oldest first.
    async fn mark_read(&self, chat_id: ChatId, reader: UserId) -> AppResult<Vec<MessageId>>;
}
