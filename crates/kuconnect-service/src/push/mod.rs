//! Web-push delivery.
//!
//! Payload encryption and VAPID signing are delegated to a relay service;
//! this side only decides what to send and to which endpoint.

pub mod disabled;
pub mod relay;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use kuconnect_core::config::{PushConfig, PushProviderKind};
use kuconnect_core::result::AppResult;
use kuconnect_entity::notification::{Notification, NotificationData};
use kuconnect_entity::push::PushSubscription;

pub use disabled::DisabledPushSender;
pub use relay::HttpPushRelay;

/// What a push service reported for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Accepted for delivery.
    Delivered,
    /// The endpoint no longer exists and should be forgotten.
    Gone,
    /// Nothing was sent.
    Skipped,
}

/// Body shown by the service worker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    /// Headline.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Full typed payload for click handling.
    pub data: NotificationData,
}

impl From<&Notification> for PushMessage {
    fn from(notification: &Notification) -> Self {
        Self {
            title: notification.data.title().to_string(),
            body: notification.data.message().to_string(),
            data: notification.data.clone(),
        }
    }
}

/// Sends one push message to one browser endpoint.
#[async_trait]
pub trait PushSender: Send + Sync + std::fmt::Debug {
    /// Deliver `message` to `subscription`.
    async fn send(
        &self,
        subscription: &PushSubscription,
        message: &PushMessage,
    ) -> AppResult<PushOutcome>;
}

/// Build the configured sender.
pub fn build_push_sender(config: &PushConfig) -> AppResult<Arc<dyn PushSender>> {
    Ok(match config.provider {
        PushProviderKind::Disabled => Arc::new(DisabledPushSender),
        PushProviderKind::Relay => Arc::new(HttpPushRelay::new(config)?),
    })
}
