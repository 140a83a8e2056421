//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kuconnect_core::types::{NotificationId, UserId};

use super::data::NotificationData;
use super::kind::NotificationKind;

/// A persisted notification. Append-only apart from `read_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Row id.
    pub id: NotificationId,
    /// Recipient.
    pub user_id: UserId,
    /// Kind, duplicated from `data` for filtering.
    pub kind: NotificationKind,
    /// Typed payload.
    #[sqlx(json)]
    pub data: NotificationData,
    /// When the recipient marked it read.
    pub read_at: Option<DateTime<Utc>>,
    /// When it was created.
    pub created_at: DateTime<Utc>,
    /// When it was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// Whether the recipient has not read it yet.
    pub fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }
}

/// Input for creating a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    /// Recipient.
    pub user_id: UserId,
    /// Payload; the kind is derived from it.
    pub data: NotificationData,
}

impl NewNotification {
    /// Build a row ready for insertion.
    pub fn into_notification(self, id: NotificationId, now: DateTime<Utc>) -> Notification {
        Notification {
            id,
            user_id: self.user_id,
            kind: self.data.kind(),
            data: self.data,
            read_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
