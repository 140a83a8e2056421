//! Read side of the interaction ledger.

use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use kuconnect_core::result::AppResult;
use kuconnect_core::types::UserId;
use kuconnect_database::store::{InteractionStore, SettingsStore};
use kuconnect_entity::profile::{Profile, ProfileView};
use kuconnect_entity::settings::Settings;

use crate::context::RequestContext;

/// Users who liked the caller and are still waiting for a judgment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingLikes {
    /// The newest likers, up to the preview limit.
    pub profiles: Vec<ProfileView>,
    /// Every pending liker.
    pub count: i64,
}

/// Derived interaction state: connections and pending likes.
#[derive(Debug, Clone)]
pub struct InteractionLedger {
    interactions: Arc<dyn InteractionStore>,
    settings: Arc<dyn SettingsStore>,
    preview_limit: i64,
}

impl InteractionLedger {
    /// Creates a new ledger service showing at most `preview_limit` likers.
    pub fn new(
        interactions: Arc<dyn InteractionStore>,
        settings: Arc<dyn SettingsStore>,
        preview_limit: i64,
    ) -> Self {
        Self {
            interactions,
            settings,
            preview_limit,
        }
    }

    /// Whether `a` and `b` like each other.
    pub async fn is_connected(&self, a: UserId, b: UserId) -> AppResult<bool> {
        self.interactions.is_connected(a, b).await
    }

    /// The caller's pending likers and their total.
    pub async fn pending(&self, ctx: &RequestContext) -> AppResult<PendingLikes> {
        let (likers, count) = tokio::try_join!(
            self.interactions
                .find_pending_likes(ctx.user_id, self.preview_limit),
            self.interactions.count_pending_likes(ctx.user_id),
        )?;
        let profiles = try_join_all(likers.into_iter().map(|p| self.as_seen_by_stranger(p))).await?;
        Ok(PendingLikes { profiles, count })
    }

    /// A liker is not connected to the caller yet, so only public contacts show.
    async fn as_seen_by_stranger(&self, profile: Profile) -> AppResult<ProfileView> {
        let settings = self
            .settings
            .find_by_user(profile.user_id)
            .await?
            .unwrap_or_else(|| Settings::defaults_for(profile.user_id, Utc::now()));
        let show_contact = settings.contact_info_visibility.permits(false, false);
        Ok(ProfileView::from_profile(profile, show_contact))
    }
}
