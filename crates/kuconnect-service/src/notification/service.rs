//! Notification inbox and push subscription registry.

use std::sync::Arc;

use tracing::info;

use kuconnect_core::error::AppError;
use kuconnect_core::result::AppResult;
use kuconnect_core::types::{NotificationId, PageRequest};
use kuconnect_database::store::{NotificationStore, PushSubscriptionStore};
use kuconnect_entity::notification::Notification;
use kuconnect_entity::push::{NewPushSubscription, PushSubscription};

use crate::context::RequestContext;

/// Read side of notifications for the owning user.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationStore>,
    subscriptions: Arc<dyn PushSubscriptionStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        subscriptions: Arc<dyn PushSubscriptionStore>,
    ) -> Self {
        Self {
            notifications,
            subscriptions,
        }
    }

    /// The caller's notifications, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<Vec<Notification>> {
        self.notifications.list_for_user(ctx.user_id, page).await
    }

    /// Mark the caller's notifications read. Ids owned by others are ignored.
    pub async fn mark_read(&self, ctx: &RequestContext, ids: &[NotificationId]) -> AppResult<u64> {
        if ids.is_empty() {
            return Err(AppError::validation("notificationIds must not be empty"));
        }
        let updated = self.notifications.mark_read(ctx.user_id, ids).await?;
        info!(user_id = %ctx.user_id, requested = ids.len(), updated, "Notifications marked read");
        Ok(updated)
    }

    /// Register (or move) a browser push endpoint for the caller.
    pub async fn subscribe(
        &self,
        ctx: &RequestContext,
        subscription: NewPushSubscription,
    ) -> AppResult<PushSubscription> {
        validate_subscription(&subscription)?;
        let row = self.subscriptions.upsert(ctx.user_id, subscription).await?;
        info!(user_id = %ctx.user_id, endpoint = %row.endpoint, "Push subscription registered");
        Ok(row)
    }
}

fn validate_subscription(subscription: &NewPushSubscription) -> AppResult<()> {
    let endpoint = subscription.endpoint.trim();
    if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
        return Err(AppError::validation("endpoint must be an http(s) URL"));
    }
    if subscription.keys.p256dh.trim().is_empty() || subscription.keys.auth.trim().is_empty() {
        return Err(AppError::validation("keys.p256dh and keys.auth are required"));
    }
    Ok(())
}
