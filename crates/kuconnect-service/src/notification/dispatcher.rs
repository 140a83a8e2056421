//! Persist-then-deliver notification fan-out.

use std::sync::Arc;

use tracing::{debug, warn};

use kuconnect_core::result::AppResult;
use kuconnect_core::types::UserId;
use kuconnect_database::store::{NotificationStore, PushSubscriptionStore, SettingsStore};
use kuconnect_entity::notification::{NewNotification, Notification, NotificationData};

use crate::live::LiveChannel;
use crate::push::{PushMessage, PushOutcome, PushSender};

/// Writes one notification row per call and attempts delivery once per channel.
///
/// Delivery failures are logged and swallowed; only the settings lookup
/// and the insert can fail a call.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    settings: Arc<dyn SettingsStore>,
    notifications: Arc<dyn NotificationStore>,
    subscriptions: Arc<dyn PushSubscriptionStore>,
    live: Arc<dyn LiveChannel>,
    push: Arc<dyn PushSender>,
}

impl NotificationDispatcher {
    /// Creates a new dispatcher.
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        notifications: Arc<dyn NotificationStore>,
        subscriptions: Arc<dyn PushSubscriptionStore>,
        live: Arc<dyn LiveChannel>,
        push: Arc<dyn PushSender>,
    ) -> Self {
        Self {
            settings,
            notifications,
            subscriptions,
            live,
            push,
        }
    }

    /// Notify `user_id`, unless their settings turn this kind off.
    ///
    /// Returns the stored row, or `None` when the toggle suppressed it. A
    /// user without a settings row gets the defaults, which allow everything.
    pub async fn notify(
        &self,
        user_id: UserId,
        data: NotificationData,
    ) -> AppResult<Option<Notification>> {
        let kind = data.kind();
        let allowed = self
            .settings
            .find_by_user(user_id)
            .await?
            .is_none_or(|settings| settings.allows(kind));
        if !allowed {
            debug!(user_id = %user_id, kind = %kind, "Notification suppressed by settings");
            return Ok(None);
        }

        let notification = self
            .notifications
            .insert(NewNotification { user_id, data })
            .await?;

        let live = self.live.push_notification(user_id, &notification);
        debug!(
            user_id = %user_id,
            notification_id = %notification.id,
            live_connections = live,
            "Notification stored"
        );

        self.push_to_subscriptions(&notification).await;
        Ok(Some(notification))
    }

    async fn push_to_subscriptions(&self, notification: &Notification) {
        let subscriptions = match self.subscriptions.list_for_user(notification.user_id).await {
            Ok(subscriptions) => subscriptions,
            Err(e) => {
                warn!(user_id = %notification.user_id, error = %e, "Failed to load push subscriptions");
                return;
            }
        };

        let message = PushMessage::from(notification);
        for subscription in &subscriptions {
            match self.push.send(subscription, &message).await {
                Ok(PushOutcome::Gone) => {
                    debug!(endpoint = %subscription.endpoint, "Push endpoint gone, removing");
                    if let Err(e) = self
                        .subscriptions
                        .delete_by_endpoint(&subscription.endpoint)
                        .await
                    {
                        warn!(endpoint = %subscription.endpoint, error = %e, "Failed to remove push endpoint");
                    }
                }
                Ok(_) => {}
                Err(e) => warn!(
                    user_id = %notification.user_id,
                    endpoint = %subscription.endpoint,
                    error = %e,
                    "Web-push delivery failed"
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuconnect_core::types::PageRequest;
    use kuconnect_entity::push::{NewPushSubscription, PushKeys};
    use kuconnect_entity::settings::SettingsPatch;

    use crate::testing::{Harness, RecordingPush};

    fn subscription(endpoint: &str) -> NewPushSubscription {
        NewPushSubscription {
            endpoint: endpoint.to_string(),
            keys: PushKeys {
                p256dh: "p".into(),
                auth: "a".into(),
            },
        }
    }

    #[tokio::test]
    async fn test_notify_persists_and_delivers_on_both_channels() {
        let h = Harness::new();
        let user = h.user_with_profile("Ann").await;
        h.stores
            .push_subscriptions
            .upsert(user, subscription("https://push.example/1"))
            .await
            .expect("subscribe");

        let row = h
            .dispatcher
            .notify(user, NotificationData::interaction())
            .await
            .expect("notify")
            .expect("stored");

        assert_eq!(h.live.notifications_for(user), vec![row.id]);
        assert_eq!(h.push.sent().len(), 1);
        let page = PageRequest::try_new(1, 10, 100).expect("page");
        let rows = h.stores.notifications.list_for_user(user, page).await.expect("list");
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_disabled_toggle_writes_nothing_and_sends_nothing() {
        let h = Harness::new();
        let user = h.user_with_profile("Ann").await;
        h.stores
            .settings
            .update(
                user,
                SettingsPatch {
                    noti_new_connection_request: Some(false),
                    ..SettingsPatch::default()
                },
            )
            .await
            .expect("update");

        let result = h
            .dispatcher
            .notify(user, NotificationData::interaction())
            .await
            .expect("notify");

        assert!(result.is_none());
        assert!(h.live.notifications_for(user).is_empty());
        assert!(h.push.sent().is_empty());
        let page = PageRequest::try_new(1, 10, 100).expect("page");
        assert!(h.stores.notifications.list_for_user(user, page).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_one_failing_endpoint_does_not_block_others() {
        let h = Harness::with_push(RecordingPush::failing_for("https://push.example/bad"));
        let user = h.user_with_profile("Ann").await;
        for endpoint in ["https://push.example/bad", "https://push.example/good"] {
            h.stores
                .push_subscriptions
                .upsert(user, subscription(endpoint))
                .await
                .expect("subscribe");
        }

        let row = h
            .dispatcher
            .notify(user, NotificationData::welcome("Ann"))
            .await
            .expect("delivery failures are swallowed");

        assert!(row.is_some());
        assert_eq!(h.push.sent(), vec!["https://push.example/good".to_string()]);
    }

    #[tokio::test]
    async fn test_gone_endpoint_is_removed() {
        let h = Harness::with_push(RecordingPush::gone_for("https://push.example/old"));
        let user = h.user_with_profile("Ann").await;
        h.stores
            .push_subscriptions
            .upsert(user, subscription("https://push.example/old"))
            .await
            .expect("subscribe");

        h.dispatcher
            .notify(user, NotificationData::welcome("Ann"))
            .await
            .expect("notify");

        let left = h.stores.push_subscriptions.list_for_user(user).await.expect("list");
        assert!(left.is_empty());
    }
}
