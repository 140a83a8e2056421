//! No-op push sender.

use async_trait::async_trait;
use tracing::debug;

use kuconnect_core::result::AppResult;
use kuconnect_entity::push::PushSubscription;

use super::{PushMessage, PushOutcome, PushSender};

/// Logs and drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPushSender;

#[async_trait]
impl PushSender for DisabledPushSender {
    async fn send(
        &self,
        subscription: &PushSubscription,
        message: &PushMessage,
    ) -> AppResult<PushOutcome> {
        debug!(
            user_id = %subscription.user_id,
            title = %message.title,
            "Web-push disabled, message dropped"
        );
        Ok(PushOutcome::Skipped)
    }
}
