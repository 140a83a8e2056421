//! Notifications and push subscriptions.

use async_trait::async_trait;
use chrono::Utc;

use kuconnect_core::error::AppError;
use kuconnect_core::result::AppResult;
use kuconnect_core::types::{NotificationId, PageRequest, SubscriptionId, UserId};
use kuconnect_entity::notification::{NewNotification, Notification};
use kuconnect_entity::push::{NewPushSubscription, PushSubscription};

use super::MemoryStore;
use crate::store::{NotificationStore, PushSubscriptionStore};

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn insert(&self, notification: NewNotification) -> AppResult<Notification> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&notification.user_id) {
            return Err(AppError::not_found("insert notification: user does not exist"));
        }
        let row = notification.into_notification(NotificationId::new(), Utc::now());
        state.notifications.push(row.clone());
        Ok(row)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> AppResult<Vec<Notification>> {
        let state = self.state.read().await;
        let newest_first: Vec<Notification> = state
            .notifications
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        Ok(page.apply(newest_first))
    }

    async fn mark_read(&self, user_id: UserId, ids: &[NotificationId]) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let mut updated = 0;
        for notification in state
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && n.is_unread() && ids.contains(&n.id))
        {
            notification.read_at = Some(now);
            notification.updated_at = now;
            updated += 1;
        }
        Ok(updated)
    }
}

#[async_trait]
impl PushSubscriptionStore for MemoryStore {
    async fn upsert(
        &self,
        user_id: UserId,
        subscription: NewPushSubscription,
    ) -> AppResult<PushSubscription> {
        let mut state = self.state.write().await;
        state
            .push_subscriptions
            .retain(|s| s.endpoint != subscription.endpoint);
        let row = PushSubscription {
            id: SubscriptionId::new(),
            user_id,
            endpoint: subscription.endpoint,
            p256dh: subscription.keys.p256dh,
            auth: subscription.keys.auth,
            created_at: Utc::now(),
        };
        state.push_subscriptions.push(row.clone());
        Ok(row)
    }

    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<PushSubscription>> {
        let state = self.state.read().await;
        Ok(state
            .push_subscriptions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_by_endpoint(&self, endpoint: &str) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let before = state.push_subscriptions.len();
        state.push_subscriptions.retain(|s| s.endpoint != endpoint);
        Ok(state.push_subscriptions.len() < before)
    }
}
