//! Like/dislike handling and the mutual-connection transition.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use kuconnect_core::error::AppError;
use kuconnect_core::events::{EventBus, MatchingEvent};
use kuconnect_core::result::AppResult;
use kuconnect_core::types::{ChatId, UserId};
use kuconnect_database::store::{ChatStore, InteractionStore, ProfileStore, UserStore};

use crate::context::RequestContext;

/// Result of one like or dislike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionOutcome {
    /// Whether the pair is now mutually connected.
    pub connected: bool,
    /// The pair's chat, present once connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<ChatId>,
}

impl InteractionOutcome {
    fn not_connected() -> Self {
        Self {
            connected: false,
            chat_id: None,
        }
    }

    fn connected(chat_id: ChatId) -> Self {
        Self {
            connected: true,
            chat_id: Some(chat_id),
        }
    }
}

/// Drives `NoInteraction -> OneWayLiked -> MutualConnected` for one ordered pair.
///
/// Side effects of the connection (chat creation, one notification per
/// party) happen once per pair: only the request whose chat insert wins
/// publishes the connection events.
#[derive(Debug, Clone)]
pub struct ConnectionOrchestrator {
    users: Arc<dyn UserStore>,
    profiles: Arc<dyn ProfileStore>,
    interactions: Arc<dyn InteractionStore>,
    chats: Arc<dyn ChatStore>,
    events: EventBus,
}

impl ConnectionOrchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        users: Arc<dyn UserStore>,
        profiles: Arc<dyn ProfileStore>,
        interactions: Arc<dyn InteractionStore>,
        chats: Arc<dyn ChatStore>,
        events: EventBus,
    ) -> Self {
        Self {
            users,
            profiles,
            interactions,
            chats,
            events,
        }
    }

    /// Record the caller's judgment of `to`.
    pub async fn create_interaction(
        &self,
        ctx: &RequestContext,
        to: UserId,
        liked: bool,
    ) -> AppResult<InteractionOutcome> {
        let from = ctx.user_id;
        if !self.users.exists(to).await? {
            return Err(AppError::not_found(format!("User {to} not found")));
        }
        if from == to {
            return Err(AppError::validation("You cannot like yourself"));
        }
        if self.interactions.find(from, to).await?.is_some() {
            return Err(AppError::conflict("Already interacted with this user"));
        }

        self.users.upsert(from, ctx.email.clone()).await?;
        if !self.interactions.record(from, to, liked).await? {
            debug!(from = %from, to = %to, "Concurrent interaction absorbed by the ledger");
            return Err(AppError::conflict("Already interacted with this user"));
        }
        info!(from = %from, to = %to, liked, "Interaction recorded");

        if !liked {
            return Ok(InteractionOutcome::not_connected());
        }
        self.events
            .publish(from, MatchingEvent::InteractionLiked { from, to });

        if !self.interactions.is_connected(from, to).await? {
            return Ok(InteractionOutcome::not_connected());
        }

        let (chat, created) = self.chats.find_or_create(from, to).await?;
        if created {
            info!(a = %from, b = %to, chat_id = %chat.id, "Connection formed");
            self.announce_connection(from, to, chat.id).await;
        }
        Ok(InteractionOutcome::connected(chat.id))
    }

    /// One connection event per party, each naming the other.
    ///
    /// The chat already exists here, so a failed name lookup only blanks the
    /// names and never fails the like.
    async fn announce_connection(&self, from: UserId, to: UserId, chat_id: ChatId) {
        let profiles = match self.profiles.find_by_users(&[from, to]).await {
            Ok(profiles) => profiles,
            Err(e) => {
                warn!(a = %from, b = %to, error = %e, "Failed to load names for connection notice");
                Vec::new()
            }
        };
        let name_of = |user: UserId| {
            profiles
                .iter()
                .find(|p| p.user_id == user)
                .map(|p| p.display_name.clone())
                .unwrap_or_default()
        };

        for (recipient, peer) in [(from, to), (to, from)] {
            self.events.publish(
                from,
                MatchingEvent::ConnectionFormed {
                    recipient,
                    peer,
                    peer_name: name_of(peer),
                    chat_id,
                },
            );
        }
    }
}
