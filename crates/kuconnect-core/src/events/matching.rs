//! Like and connection events.

use serde::{Deserialize, Serialize};

use crate::types::{ChatId, UserId};

/// Events raised by the connection orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchingEvent {
    /// `from` liked `to`.
    InteractionLiked {
        /// The liker.
        from: UserId,
        /// The liked user.
        to: UserId,
    },
    /// `recipient` and `peer` like each other. Raised once per recipient.
    ConnectionFormed {
        /// Who is told about the connection.
        recipient: UserId,
        /// The other party.
        peer: UserId,
        /// Display name of the other party.
        peer_name: String,
        /// The pair's chat.
        chat_id: ChatId,
    },
}
