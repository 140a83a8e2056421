//! Chats and messages.

use async_trait::async_trait;
use chrono::Utc;

use kuconnect_core::error::AppError;
use kuconnect_core::result::AppResult;
use kuconnect_core::types::{ChatId, MessageId, UserId};
use kuconnect_entity::chat::{Chat, Message};

use super::MemoryStore;
use crate::find_one::FindOne;
use crate::store::ChatStore;

#[async_trait]
impl ChatStore for MemoryStore {
    async fn find_between(&self, a: UserId, b: UserId) -> AppResult<Option<Chat>> {
        let state = self.state.read().await;
        let rows: Vec<Chat> = state
            .chats
            .iter()
            .filter(|c| c.is_between(a, b))
            .cloned()
            .collect();
        FindOne::from_rows(rows).into_option("chat")
    }

    async fn find_or_create(&self, a: UserId, b: UserId) -> AppResult<(Chat, bool)> {
        if a == b {
            return Err(AppError::validation("A chat needs two different users"));
        }
        let mut state = self.state.write().await;
        if let Some(chat) = state.chats.iter().find(|c| c.is_between(a, b)) {
            return Ok((chat.clone(), false));
        }
        if !state.users.contains_key(&a) || !state.users.contains_key(&b) {
            return Err(AppError::not_found("create chat: user does not exist"));
        }
        let chat = Chat {
            id: ChatId::new(),
            user_1: a,
            user_2: b,
            created_at: Utc::now(),
        };
        state.chats.push(chat.clone());
        Ok((chat, true))
    }

    async fn find_by_id(&self, id: ChatId) -> AppResult<Option<Chat>> {
        let state = self.state.read().await;
        Ok(state.chats.iter().find(|c| c.id == id).cloned())
    }

    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<Chat>> {
        let state = self.state.read().await;
        Ok(state
            .chats
            .iter()
            .rev()
            .filter(|c| c.has_member(user_id))
            .cloned()
            .collect())
    }

    async fn insert_message(
        &self,
        chat_id: ChatId,
        author_id: UserId,
        content: &str,
    ) -> AppResult<Message> {
        let mut state = self.state.write().await;
        if !state.chats.iter().any(|c| c.id == chat_id) {
            return Err(AppError::not_found(format!("Chat {chat_id} does not exist")));
        }
        let message = Message {
            id: MessageId::new(),
            chat_id,
            author_id,
            content: content.to_string(),
            is_read: false,
            created_at: Utc::now(),
        };
        state.messages.push(message.clone());
        Ok(message)
    }

    async fn messages(&self, chat_id: ChatId) -> AppResult<Vec<Message>> {
        let state = self.state.read().await;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect())
    }

    async fn last_message(&self, chat_id: ChatId) -> AppResult<Option<Message>> {
        let state = self.state.read().await;
        Ok(state
            .messages
            .iter()
            .rev()
            .find(|m| m.chat_id == chat_id)
            .cloned())
    }

    async fn count_unread(&self, chat_id: ChatId, reader: UserId) -> AppResult<i64> {
        let state = self.state.read().await;
        let count = state
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id && m.author_id != reader && !m.is_read)
            .count();
        Ok(count as i64)
    }

    async fn mark_read(&self, chat_id: ChatId, reader: UserId) -> AppResult<Vec<MessageId>> {
        let mut state = self.state.write().await;
        Ok(state
            .messages
            .iter_mut()
            .filter(|m| m.chat_id == chat_id && m.author_id != reader && !m.is_read)
            .map(|m| {
                m.is_read = true;
                m.id
            })
            .collect())
    }
}
