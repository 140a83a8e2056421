//! Chat repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use kuconnect_core::error::AppError;
use kuconnect_core::result::AppResult;
use kuconnect_core::types::{ChatId, MessageId, UserId};
use kuconnect_entity::chat::{Chat, Message};

use crate::errors::map_sqlx;
use crate::find_one::FindOne;
use crate::store::ChatStore;

const MESSAGE_COLUMNS: &str = "id, chat_id, author_id, content, is_read, created_at";

/// Repository for chats and messages.
///
/// `idx_chats_pair` makes the unordered pair unique, so concurrent
/// `find_or_create` calls converge on one row.
#[derive(Debug, Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    /// Create a new chat repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatStore for ChatRepository {
    async fn find_between(&self, a: UserId, b: UserId) -> AppResult<Option<Chat>> {
        let rows = sqlx::query_as::<_, Chat>(
            "SELECT id, user_1, user_2, created_at FROM chats \
             WHERE (user_1 = $1 AND user_2 = $2) OR (user_1 = $2 AND user_2 = $1)",
        )
        .bind(a)
        .bind(b)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("find chat between users"))?;
        FindOne::from_rows(rows).into_option("chat")
    }

    async fn find_or_create(&self, a: UserId, b: UserId) -> AppResult<(Chat, bool)> {
        let inserted = sqlx::query_as::<_, Chat>(
            "INSERT INTO chats (id, user_1, user_2, created_at) VALUES ($1, $2, $3, $4) \
             ON CONFLICT DO NOTHING RETURNING id, user_1, user_2, created_at",
        )
        .bind(ChatId::new())
        .bind(a)
        .bind(b)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx("create chat"))?;

        if let Some(chat) = inserted {
            return Ok((chat, true));
        }
        self.find_between(a, b)
            .await?
            .map(|chat| (chat, false))
            .ok_or_else(|| AppError::internal("Chat vanished after a conflicting insert"))
    }

    async fn find_by_id(&self, id: ChatId) -> AppResult<Option<Chat>> {
        sqlx::query_as::<_, Chat>("SELECT id, user_1, user_2, created_at FROM chats WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx("find chat"))
    }

    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<Chat>> {
        sqlx::query_as::<_, Chat>(
            "SELECT id, user_1, user_2, created_at FROM chats \
             WHERE user_1 = $1 OR user_2 = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("list chats"))
    }

    async fn insert_message(
        &self,
        chat_id: ChatId,
        author_id: UserId,
        content: &str,
    ) -> AppResult<Message> {
        let sql = format!(
            "INSERT INTO messages (id, chat_id, author_id, content, is_read, created_at) \
             VALUES ($1, $2, $3, $4, FALSE, $5) RETURNING {MESSAGE_COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&sql)
            .bind(MessageId::new())
            .bind(chat_id)
            .bind(author_id)
            .bind(content)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx("insert message"))
    }

    async fn messages(&self, chat_id: ChatId) -> AppResult<Vec<Message>> {
        let sql = format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE chat_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Message>(&sql)
            .bind(chat_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx("list messages"))
    }

    async fn last_message(&self, chat_id: ChatId) -> AppResult<Option<Message>> {
        let sql = format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE chat_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, Message>(&sql)
            .bind(chat_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx("find last message"))
    }

    async fn count_unread(&self, chat_id: ChatId, reader: UserId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM messages \
             WHERE chat_id = $1 AND author_id <> $2 AND NOT is_read",
        )
        .bind(chat_id)
        .bind(reader)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx("count unread messages"))
    }

    async fn mark_read(&self, chat_id: ChatId, reader: UserId) -> AppResult<Vec<MessageId>> {
        let mut flipped = sqlx::query_as::<_, (MessageId, DateTime<Utc>)>(
            "UPDATE messages SET is_read = TRUE \
             WHERE chat_id = $1 AND author_id <> $2 AND NOT is_read \
             RETURNING id, created_at",
        )
        .bind(chat_id)
        .bind(reader)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("mark messages read"))?;
        flipped.sort_by_key(|(id, created_at)| (*created_at, *id));
        Ok(flipped.into_iter().map(|(id, _)| id).collect())
    }
}
