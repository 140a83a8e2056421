//! Chat lookup, listing and messaging.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, info};

use kuconnect_core::error::AppError;
use kuconnect_core::events::{ChatEvent, EventBus};
use kuconnect_core::result::AppResult;
use kuconnect_core::types::{ChatId, MessageId, UserId};
use kuconnect_database::store::{ChatStore, InteractionStore, ProfileStore};
use kuconnect_entity::chat::{Chat, ChatDetail, ChatPeer, ChatSummary, LastMessage, Message};
use kuconnect_entity::profile::Profile;

use crate::context::RequestContext;
use crate::live::LiveChannel;

/// Longest accepted message body, in characters.
pub const MAX_MESSAGE_CHARS: usize = 255;

const PREVIEW_CHARS: usize = 100;

/// Chats and messages for their two members.
#[derive(Debug, Clone)]
pub struct ChatService {
    chats: Arc<dyn ChatStore>,
    profiles: Arc<dyn ProfileStore>,
    interactions: Arc<dyn InteractionStore>,
    live: Arc<dyn LiveChannel>,
    events: EventBus,
}

impl ChatService {
    /// Creates a new chat service.
    pub fn new(
        chats: Arc<dyn ChatStore>,
        profiles: Arc<dyn ProfileStore>,
        interactions: Arc<dyn InteractionStore>,
        live: Arc<dyn LiveChannel>,
        events: EventBus,
    ) -> Self {
        Self {
            chats,
            profiles,
            interactions,
            live,
            events,
        }
    }

    /// The chat between the caller and `peer`, created if missing.
    ///
    /// Only connected users may chat.
    pub async fn open_chat(&self, ctx: &RequestContext, peer: UserId) -> AppResult<Chat> {
        if ctx.is_self(peer) {
            return Err(AppError::validation("You cannot chat with yourself"));
        }
        if !self.interactions.is_connected(ctx.user_id, peer).await? {
            return Err(AppError::forbidden("You can only chat with your connections"));
        }
        let (chat, created) = self.chats.find_or_create(ctx.user_id, peer).await?;
        if created {
            info!(chat_id = %chat.id, a = %ctx.user_id, b = %peer, "Chat opened");
        }
        Ok(chat)
    }

    /// The caller's chats, most recent activity first.
    pub async fn list_chats(&self, ctx: &RequestContext) -> AppResult<Vec<ChatSummary>> {
        let chats = self.chats.list_for_user(ctx.user_id).await?;
        let peer_ids: Vec<UserId> = chats
            .iter()
            .filter_map(|c| c.other_member(ctx.user_id))
            .collect();
        let peers = self.profiles.find_by_users(&peer_ids).await?;
        let peers = &peers;

        let mut summaries = try_join_all(chats.iter().map(|chat| async move {
            let (last, unread_count) = tokio::try_join!(
                self.chats.last_message(chat.id),
                self.chats.count_unread(chat.id, ctx.user_id),
            )?;
            let peer_id = chat.other_member(ctx.user_id).unwrap_or(chat.user_1);
            Ok::<_, AppError>(ChatSummary {
                chat_id: chat.id,
                peer: peer_of(peer_id, peers),
                last_message: last.map(|m| LastMessage {
                    content: m.content,
                    created_at: m.created_at,
                }),
                unread_count,
            })
        }))
        .await?;

        summaries.sort_by(ChatSummary::by_recency);
        Ok(summaries)
    }

    /// Open a chat: every message oldest first, peer messages marked read.
    pub async fn get_chat(&self, ctx: &RequestContext, chat_id: ChatId) -> AppResult<ChatDetail> {
        let chat = self.member_chat(ctx.user_id, chat_id).await?;
        let peer_id = chat.other_member(ctx.user_id).unwrap_or(chat.user_1);

        self.read_all(ctx.user_id, chat_id).await?;
        let peer_ids = [peer_id];
        let (messages, peers) = tokio::try_join!(
            self.chats.messages(chat_id),
            self.profiles.find_by_users(&peer_ids),
        )?;

        Ok(ChatDetail {
            chat_id,
            target: peer_of(peer_id, &peers),
            messages,
        })
    }

    /// Append a message from the caller and fan it out to the chat room.
    pub async fn send_message(
        &self,
        ctx: &RequestContext,
        chat_id: ChatId,
        content: &str,
    ) -> AppResult<Message> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::validation("content must not be empty"));
        }
        if content.chars().count() > MAX_MESSAGE_CHARS {
            return Err(AppError::validation(format!(
                "content must be at most {MAX_MESSAGE_CHARS} characters"
            )));
        }

        let chat = self.member_chat(ctx.user_id, chat_id).await?;
        let message = self
            .chats
            .insert_message(chat_id, ctx.user_id, content)
            .await?;
        let delivered = self.live.push_message(chat_id, &message);
        debug!(chat_id = %chat_id, message_id = %message.id, delivered, "Message sent");

        if let Some(recipient) = chat.other_member(ctx.user_id) {
            let author_name = self
                .profiles
                .find_by_user(ctx.user_id)
                .await?
                .map(|p| p.display_name)
                .unwrap_or_default();
            self.events.publish(
                ctx.user_id,
                ChatEvent::MessageSent {
                    chat_id,
                    message_id: message.id,
                    author: ctx.user_id,
                    author_name,
                    recipient,
                    preview: content.chars().take(PREVIEW_CHARS).collect(),
                },
            );
        }
        Ok(message)
    }

    /// Mark every peer message in the chat read and broadcast the receipts.
    pub async fn mark_read(&self, ctx: &RequestContext, chat_id: ChatId) -> AppResult<Vec<MessageId>> {
        self.member_chat(ctx.user_id, chat_id).await?;
        self.read_all(ctx.user_id, chat_id).await
    }

    /// The chat, if `user_id` is one of its members.
    pub async fn member_chat(&self, user_id: UserId, chat_id: ChatId) -> AppResult<Chat> {
        let chat = self
            .chats
            .find_by_id(chat_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Chat {chat_id} not found")))?;
        if !chat.has_member(user_id) {
            return Err(AppError::forbidden("You are not a member of this chat"));
        }
        Ok(chat)
    }

    async fn read_all(&self, reader: UserId, chat_id: ChatId) -> AppResult<Vec<MessageId>> {
        let read = self.chats.mark_read(chat_id, reader).await?;
        if !read.is_empty() {
            self.live.push_read_receipts(chat_id, &read);
            debug!(chat_id = %chat_id, reader = %reader, count = read.len(), "Messages marked read");
        }
        Ok(read)
    }
}

fn peer_of(peer_id: UserId, profiles: &[Profile]) -> ChatPeer {
    let profile = profiles.iter().find(|p| p.user_id == peer_id);
    ChatPeer {
        id: peer_id,
        name: profile.map(|p| p.display_name.clone()).unwrap_or_default(),
        avatar: profile.and_then(|p| p.image.clone()),
    }
}
