//! Push subscription entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kuconnect_core::types::{SubscriptionId, UserId};

/// A browser push endpoint registered by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscription {
    /// Row id.
    pub id: SubscriptionId,
    /// Owner.
    pub user_id: UserId,
    /// Push service URL; unique across all users.
    pub endpoint: String,
    /// Client public key (base64url).
    pub p256dh: String,
    /// Client auth secret (base64url).
    pub auth: String,
    /// When it was registered or last refreshed.
    pub created_at: DateTime<Utc>,
}

/// Keys half of a browser `PushSubscription` JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushKeys {
    /// Client public key.
    pub p256dh: String,
    /// Client auth secret.
    pub auth: String,
}

/// Subscription as posted by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPushSubscription {
    /// Push service URL.
    pub endpoint: String,
    /// Encryption keys.
    pub keys: PushKeys,
}
