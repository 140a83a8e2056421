//! Live delivery over the connection manager.

use kuconnect_core::types::{ChatId, MessageId, UserId};
use kuconnect_entity::chat::Message;
use kuconnect_entity::notification::Notification;
use kuconnect_service::live::LiveChannel;

use crate::connection::manager::ConnectionManager;
use crate::message::types::OutboundMessage;
use crate::room::Room;

impl LiveChannel for ConnectionManager {
    fn push_notification(&self, user_id: UserId, notification: &Notification) -> usize {
        self.send_to_user(
            user_id,
            &OutboundMessage::Notification {
                notification: notification.clone(),
            },
        )
    }

    fn push_message(&self, chat_id: ChatId, message: &Message) -> usize {
        self.send_to_room(
            &Room::Chat(chat_id),
            &OutboundMessage::ReceiveMessage {
                message: message.clone(),
            },
        )
    }

    fn push_read_receipts(&self, chat_id: ChatId, message_ids: &[MessageId]) -> usize {
        let room = Room::Chat(chat_id);
        message_ids
            .iter()
            .map(|message_id| {
                self.send_to_room(
                    &room,
                    &OutboundMessage::ReadMessage {
                        chat_id,
                        message_id: *message_id,
                    },
                )
            })
            .sum()
    }
}
