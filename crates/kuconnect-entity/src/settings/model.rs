//! Settings entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kuconnect_core::types::UserId;

use super::visibility::Visibility;
use crate::notification::NotificationKind;

/// One row per user, created alongside the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Owner.
    pub user_id: UserId,
    /// Who may see the profile at all.
    pub profile_visibility: Visibility,
    /// Who may see social handles.
    pub contact_info_visibility: Visibility,
    /// Notify on new chat messages.
    pub noti_new_message: bool,
    /// Notify when someone likes the user.
    pub noti_new_connection_request: bool,
    /// Notify when a like becomes mutual.
    pub noti_new_connection_request_accept: bool,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Settings {
    /// Defaults applied at profile creation: public profile, contacts for connections, all toggles on.
    pub fn defaults_for(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            profile_visibility: Visibility::Public,
            contact_info_visibility: Visibility::Connected,
            noti_new_message: true,
            noti_new_connection_request: true,
            noti_new_connection_request_accept: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the user wants notifications of this kind.
    pub fn allows(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::Interaction => self.noti_new_connection_request,
            NotificationKind::NewConnection => self.noti_new_connection_request_accept,
            NotificationKind::NewMessage => self.noti_new_message,
            NotificationKind::Welcome => true,
        }
    }

    /// Apply a partial update.
    pub fn apply(&mut self, patch: SettingsPatch, now: DateTime<Utc>) {
        if let Some(v) = patch.profile_visibility {
            self.profile_visibility = v;
        }
        if let Some(v) = patch.contact_info_visibility {
            self.contact_info_visibility = v;
        }
        if let Some(v) = patch.noti_new_message {
            self.noti_new_message = v;
        }
        if let Some(v) = patch.noti_new_connection_request {
            self.noti_new_connection_request = v;
        }
        if let Some(v) = patch.noti_new_connection_request_accept {
            self.noti_new_connection_request_accept = v;
        }
        self.updated_at = now;
    }
}

/// Partial settings update; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    /// New profile visibility.
    pub profile_visibility: Option<Visibility>,
    /// New contact visibility.
    pub contact_info_visibility: Option<Visibility>,
    /// New-message toggle.
    pub noti_new_message: Option<bool>,
    /// Like toggle.
    pub noti_new_connection_request: Option<bool>,
    /// Mutual-connection toggle.
    pub noti_new_connection_request_accept: Option<bool>,
}

impl SettingsPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
