//! Profile creation, editing, viewing and interest management.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use kuconnect_core::error::AppError;
use kuconnect_core::events::{EventBus, ProfileEvent};
use kuconnect_core::result::AppResult;
use kuconnect_core::types::{InterestId, UserId};
use kuconnect_database::store::{
    InteractionStore, InterestStore, ProfileStore, SettingsStore, UserStore,
};
use kuconnect_entity::interest::Interest;
use kuconnect_entity::profile::{OwnProfile, Profile, ProfileDetail, ProfileFields, ProfileView};
use kuconnect_entity::settings::Settings;

use crate::context::RequestContext;
use crate::embedding::{Embedder, background_prompt, interest_prompt};

const MAX_DISPLAY_NAME_CHARS: usize = 100;

/// Owns the profile row, its interest set and its embedding.
#[derive(Debug, Clone)]
pub struct ProfileService {
    users: Arc<dyn UserStore>,
    profiles: Arc<dyn ProfileStore>,
    interests: Arc<dyn InterestStore>,
    interactions: Arc<dyn InteractionStore>,
    settings: Arc<dyn SettingsStore>,
    embedder: Arc<dyn Embedder>,
    events: EventBus,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(
        users: Arc<dyn UserStore>,
        profiles: Arc<dyn ProfileStore>,
        interests: Arc<dyn InterestStore>,
        interactions: Arc<dyn InteractionStore>,
        settings: Arc<dyn SettingsStore>,
        embedder: Arc<dyn Embedder>,
        events: EventBus,
    ) -> Self {
        Self {
            users,
            profiles,
            interests,
            interactions,
            settings,
            embedder,
            events,
        }
    }

    /// Create the caller's profile with its interests, embedding and default settings.
    ///
    /// Fails with `Conflict` if the caller already has one. Everything is
    /// written in one transaction.
    pub async fn create_profile(
        &self,
        ctx: &RequestContext,
        fields: ProfileFields,
        interest_ids: Vec<InterestId>,
    ) -> AppResult<Profile> {
        validate_fields(&fields)?;
        if self.profiles.find_by_user(ctx.user_id).await?.is_some() {
            return Err(AppError::conflict("Profile already exists"));
        }

        let ids = dedup(interest_ids);
        let picked = self.resolve_interests(&ids).await?;
        let prompt = if picked.is_empty() {
            background_prompt(&fields)
        } else {
            interest_prompt(&names(&picked))
        };
        let embedding = self.embedder.embed(&prompt).await?;

        self.users.upsert(ctx.user_id, ctx.email.clone()).await?;
        let profile = self
            .profiles
            .create_profile(ctx.user_id, fields, &ids, &embedding)
            .await?;

        info!(
            user_id = %ctx.user_id,
            profile_id = %profile.id,
            interests = ids.len(),
            "Profile created"
        );
        self.events.publish(
            ctx.user_id,
            ProfileEvent::Created {
                user_id: ctx.user_id,
                display_name: profile.display_name.clone(),
            },
        );
        Ok(profile)
    }

    /// Replace every editable field of the caller's profile.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        fields: ProfileFields,
    ) -> AppResult<Profile> {
        validate_fields(&fields)?;
        let profile = self
            .profiles
            .update_profile(ctx.user_id, fields)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))?;
        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(profile)
    }

    /// The caller's profile, unfiltered, with interests and settings.
    pub async fn get_own_profile(&self, ctx: &RequestContext) -> AppResult<OwnProfile> {
        let (profile, interests, settings) = tokio::try_join!(
            self.profiles.find_by_user(ctx.user_id),
            self.interests.find_by_user(ctx.user_id),
            self.settings.find_by_user(ctx.user_id),
        )?;
        let profile = profile.ok_or_else(|| AppError::not_found("Profile not found"))?;
        let settings = settings.unwrap_or_else(|| Settings::defaults_for(ctx.user_id, Utc::now()));
        Ok(OwnProfile {
            profile,
            interests,
            settings,
        })
    }

    /// Another user's profile as the caller may see it.
    ///
    /// A profile the caller may not see is reported as `NotFound`.
    pub async fn get_profile(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<ProfileDetail> {
        let profile = self
            .profiles
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))?;

        let is_owner = ctx.is_self(user_id);
        let settings = self
            .settings
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| Settings::defaults_for(user_id, Utc::now()));
        let is_connected = !is_owner && self.interactions.is_connected(ctx.user_id, user_id).await?;

        if !settings.profile_visibility.permits(is_owner, is_connected) {
            return Err(AppError::not_found("Profile not found"));
        }
        let show_contact = settings
            .contact_info_visibility
            .permits(is_owner, is_connected);
        let interests = self.interests.find_by_user(user_id).await?;

        Ok(ProfileDetail {
            profile: ProfileView::from_profile(profile, show_contact),
            interests,
        })
    }

    /// The caller's interests.
    pub async fn get_interests(&self, ctx: &RequestContext) -> AppResult<Vec<Interest>> {
        self.interests.find_by_user(ctx.user_id).await
    }

    /// Replace the caller's interest set and refresh the embedding.
    ///
    /// An empty set clears the interests and keeps the previous embedding.
    pub async fn set_interests(
        &self,
        ctx: &RequestContext,
        interest_ids: Vec<InterestId>,
    ) -> AppResult<Vec<Interest>> {
        if self.profiles.find_by_user(ctx.user_id).await?.is_none() {
            return Err(AppError::not_found("Profile not found"));
        }
        let ids = dedup(interest_ids);
        let picked = self.resolve_interests(&ids).await?;

        let embedding = if picked.is_empty() {
            None
        } else {
            Some(self.embedder.embed(&interest_prompt(&names(&picked))).await?)
        };
        self.profiles
            .replace_interests(ctx.user_id, &ids, embedding.as_ref())
            .await?;

        info!(
            user_id = %ctx.user_id,
            interests = ids.len(),
            embedding_refreshed = embedding.is_some(),
            "Interests replaced"
        );
        self.interests.find_by_user(ctx.user_id).await
    }

    /// The global interest catalog.
    pub async fn list_catalog(&self) -> AppResult<Vec<Interest>> {
        self.interests.list_all().await
    }

    async fn resolve_interests(&self, ids: &[InterestId]) -> AppResult<Vec<Interest>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let found = self.interests.find_by_ids(ids).await?;
        if let Some(missing) = ids.iter().find(|id| !found.iter().any(|i| i.id == **id)) {
            return Err(AppError::not_found(format!("Interest {missing} does not exist")));
        }
        Ok(found)
    }
}

fn validate_fields(fields: &ProfileFields) -> AppResult<()> {
    let name = fields.display_name.trim();
    if name.is_empty() {
        return Err(AppError::validation("displayName is required"));
    }
    if name.chars().count() > MAX_DISPLAY_NAME_CHARS {
        return Err(AppError::validation(format!(
            "displayName must be at most {MAX_DISPLAY_NAME_CHARS} characters"
        )));
    }
    if let Some(year) = fields.year {
        if !(1..=8).contains(&year) {
            return Err(AppError::validation("year must be between 1 and 8"));
        }
    }
    Ok(())
}

fn dedup(mut ids: Vec<InterestId>) -> Vec<InterestId> {
    ids.sort();
    ids.dedup();
    ids
}

fn names(interests: &[Interest]) -> Vec<&str> {
    interests.iter().map(|i| i.name.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuconnect_core::error::ErrorKind;
    use kuconnect_entity::notification::NotificationKind;
    use kuconnect_entity::settings::{SettingsPatch, Visibility};

    use crate::testing::Harness;

    fn fields(name: &str) -> ProfileFields {
        ProfileFields {
            display_name: name.to_string(),
            faculty: Some("Engineering".into()),
            line: Some("line-id".into()),
            year: Some(2),
            ..ProfileFields::default()
        }
    }

    #[tokio::test]
    async fn test_create_profile_seeds_settings_and_welcomes() {
        let h = Harness::new();
        let user = UserId::new();
        let ctx = RequestContext::new(user, Some("ann@ku.th".into()));
        let coding = h.interest("Coding").await;

        let profile = h
            .profiles()
            .create_profile(&ctx, fields("Ann"), vec![coding.id, coding.id])
            .await
            .expect("create");
        assert_eq!(profile.user_id, user);

        let own = h.profiles().get_own_profile(&ctx).await.expect("own");
        assert_eq!(own.interests, vec![coding]);
        assert_eq!(own.settings.profile_visibility, Visibility::Public);
        assert!(h.memory.embedding_of(user).await.is_some());

        h.settle().await;
        let kinds: Vec<NotificationKind> =
            h.notifications_of(user).await.into_iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NotificationKind::Welcome]);
    }

    #[tokio::test]
    async fn test_second_create_conflicts() {
        let h = Harness::new();
        let ctx = RequestContext::new(UserId::new(), None);
        h.profiles()
            .create_profile(&ctx, fields("Ann"), vec![])
            .await
            .expect("create");
        let err = h
            .profiles()
            .create_profile(&ctx, fields("Again"), vec![])
            .await
            .expect_err("duplicate");
        assert_eq!(err.kind, ErrorKind::Conflict);
        let own = h.profiles().get_own_profile(&ctx).await.expect("own");
        assert_eq!(own.profile.display_name, "Ann");
    }

    #[tokio::test]
    async fn test_invalid_fields_are_rejected_before_writing() {
        let h = Harness::new();
        let ctx = RequestContext::new(UserId::new(), None);
        let mut bad = fields("Ann");
        bad.year = Some(9);
        let err = h
            .profiles()
            .create_profile(&ctx, bad, vec![])
            .await
            .expect_err("year");
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = h
            .profiles()
            .create_profile(&ctx, fields("   "), vec![])
            .await
            .expect_err("name");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(h.stores.profiles.find_by_user(ctx.user_id).await.expect("find").is_none());
    }

    #[tokio::test]
    async fn test_unknown_interest_is_not_found() {
        let h = Harness::new();
        let ctx = RequestContext::new(UserId::new(), None);
        let err = h
            .profiles()
            .create_profile(&ctx, fields("Ann"), vec![InterestId::new()])
            .await
            .expect_err("unknown");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_set_interests_refreshes_embedding_unless_empty() {
        let h = Harness::new();
        let user = h.user_with_profile("Ann").await;
        let ctx = RequestContext::new(user, None);
        let before = h.memory.embedding_of(user).await;

        let music = h.interest("Music").await;
        let set = h
            .profiles()
            .set_interests(&ctx, vec![music.id])
            .await
            .expect("set");
        assert_eq!(set, vec![music]);
        let refreshed = h.memory.embedding_of(user).await;
        assert_ne!(refreshed, before);

        let cleared = h.profiles().set_interests(&ctx, vec![]).await.expect("clear");
        assert!(cleared.is_empty());
        assert_eq!(h.memory.embedding_of(user).await, refreshed);
    }

    #[tokio::test]
    async fn test_get_profile_honours_visibility() {
        let h = Harness::new();
        let owner = h.user_with_profile("Owner").await;
        let stranger = h.user_with_profile("Stranger").await;
        let friend = h.user_with_profile("Friend").await;
        h.connect(owner, friend).await;

        let as_stranger = RequestContext::new(stranger, None);
        let as_friend = RequestContext::new(friend, None);
        let as_owner = RequestContext::new(owner, None);

        let seen = h.profiles().get_profile(&as_stranger, owner).await.expect("public");
        assert!(seen.profile.contact.is_none());
        let seen = h.profiles().get_profile(&as_friend, owner).await.expect("public");
        assert!(seen.profile.contact.is_some());

        h.stores
            .settings
            .update(
                owner,
                SettingsPatch {
                    profile_visibility: Some(Visibility::Connected),
                    ..SettingsPatch::default()
                },
            )
            .await
            .expect("update");
        let err = h
            .profiles()
            .get_profile(&as_stranger, owner)
            .await
            .expect_err("hidden");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(h.profiles().get_profile(&as_friend, owner).await.is_ok());

        h.stores
            .settings
            .update(
                owner,
                SettingsPatch {
                    profile_visibility: Some(Visibility::Private),
                    ..SettingsPatch::default()
                },
            )
            .await
            .expect("update");
        assert!(h.profiles().get_profile(&as_friend, owner).await.is_err());
        let own = h.profiles().get_profile(&as_owner, owner).await.expect("owner");
        assert!(own.profile.contact.is_some());
    }
}
