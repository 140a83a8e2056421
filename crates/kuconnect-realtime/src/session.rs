//! Per-connection handling of inbound frames.

use std::sync::Arc;

use tracing::{debug, warn};

use kuconnect_core::result::AppResult;
use kuconnect_service::chat::ChatService;
use kuconnect_service::context::RequestContext;

use crate::connection::handle::ConnectionHandle;
use crate::connection::manager::ConnectionManager;
use crate::message::types::{InboundMessage, OutboundMessage};
use crate::room::Room;

/// Interprets client frames for one authenticated connection.
///
/// Failures are answered with an `error` frame; they never close the socket.
#[derive(Debug, Clone)]
pub struct RealtimeSession {
    connections: Arc<ConnectionManager>,
    chats: ChatService,
}

impl RealtimeSession {
    /// Creates a new session handler.
    pub fn new(connections: Arc<ConnectionManager>, chats: ChatService) -> Self {
        Self { connections, chats }
    }

    /// Handle one raw text frame from `handle`'s client.
    pub async fn handle_inbound(&self, handle: &ConnectionHandle, raw: &str) {
        let message: InboundMessage = match serde_json::from_str(raw) {
            Ok(m) => m,
            Err(e) => {
                self.reply(
                    handle,
                    &OutboundMessage::Error {
                        code: "INVALID_MESSAGE".to_string(),
                        message: format!("Failed to parse message: {e}"),
                    },
                );
                return;
            }
        };

        if let Err(e) = self.dispatch(handle, message).await {
            if e.is_server_error() {
                warn!(conn_id = %handle.id, user_id = %handle.user_id, error = %e, "WebSocket frame failed");
            } else {
                debug!(conn_id = %handle.id, error = %e, "WebSocket frame rejected");
            }
            self.reply(handle, &OutboundMessage::error(&e));
        }
    }

    async fn dispatch(&self, handle: &ConnectionHandle, message: InboundMessage) -> AppResult<()> {
        let ctx = RequestContext::new(handle.user_id, None);
        match message {
            InboundMessage::JoinChat { chat_id } => {
                self.chats.member_chat(handle.user_id, chat_id).await?;
                self.connections.join(handle.id, Room::Chat(chat_id));
                self.reply(handle, &OutboundMessage::Joined { chat_id });
            }
            InboundMessage::LeaveChat { chat_id } => {
                self.connections.leave(handle.id, Room::Chat(chat_id));
                self.reply(handle, &OutboundMessage::Left { chat_id });
            }
            InboundMessage::SendMessage { chat_id, content } => {
                self.chats.send_message(&ctx, chat_id, &content).await?;
            }
            InboundMessage::MarkAsRead { chat_id } => {
                self.chats.mark_read(&ctx, chat_id).await?;
            }
            InboundMessage::Ping => self.reply(handle, &OutboundMessage::Pong),
        }
        Ok(())
    }

    fn reply(&self, handle: &ConnectionHandle, message: &OutboundMessage) {
        if !self.connections.send_to_connection(&handle.id, message) {
            debug!(conn_id = %handle.id, "Reply dropped, connection gone or full");
        }
    }
}
