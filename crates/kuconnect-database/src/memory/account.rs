//! Users, interests and settings.

use async_trait::async_trait;
use chrono::Utc;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::{InterestId, UserId};
use kuconnect_entity::interest::{Interest, UserInterest};
use kuconnect_entity::settings::{Settings, SettingsPatch};
use kuconnect_entity::user::User;

use super::MemoryStore;
use crate::store::{InterestStore, SettingsStore, UserStore};

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn exists(&self, id: UserId) -> AppResult<bool> {
        Ok(self.state.read().await.users.contains_key(&id))
    }

    async fn upsert(&self, id: UserId, email: Option<String>) -> AppResult<User> {
        let mut state = self.state.write().await;
        let user = state.users.entry(id).or_insert_with(|| User {
            id,
            email: None,
            created_at: Utc::now(),
        });
        if email.is_some() {
            user.email = email;
        }
        Ok(user.clone())
    }
}

fn sorted_by_name(mut interests: Vec<Interest>) -> Vec<Interest> {
    interests.sort_by(|a, b| a.name.cmp(&b.name));
    interests
}

#[async_trait]
impl InterestStore for MemoryStore {
    async fn list_all(&self) -> AppResult<Vec<Interest>> {
        Ok(sorted_by_name(self.state.read().await.interests.clone()))
    }

    async fn find_by_ids(&self, ids: &[InterestId]) -> AppResult<Vec<Interest>> {
        let state = self.state.read().await;
        let found = state
            .interests
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect();
        Ok(sorted_by_name(found))
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<Interest>> {
        let state = self.state.read().await;
        let found = state
            .interests
            .iter()
            .filter(|i| state.user_interests.contains(&(user_id, i.id)))
            .cloned()
            .collect();
        Ok(sorted_by_name(found))
    }

    async fn find_by_users(&self, user_ids: &[UserId]) -> AppResult<Vec<UserInterest>> {
        let state = self.state.read().await;
        let mut found: Vec<UserInterest> = state
            .user_interests
            .iter()
            .filter(|(user_id, _)| user_ids.contains(user_id))
            .filter_map(|(user_id, interest_id)| {
                state
                    .interests
                    .iter()
                    .find(|i| i.id == *interest_id)
                    .map(|i| UserInterest {
                        user_id: *user_id,
                        id: i.id,
                        name: i.name.clone(),
                    })
            })
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Settings>> {
        Ok(self.state.read().await.settings.get(&user_id).cloned())
    }

    async fn update(&self, user_id: UserId, patch: SettingsPatch) -> AppResult<Option<Settings>> {
        let mut state = self.state.write().await;
        Ok(state.settings.get_mut(&user_id).map(|settings| {
            settings.apply(patch, Utc::now());
            settings.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuconnect_entity::settings::Visibility;

    use crate::memory::test_support::user_with_profile;

    #[tokio::test]
    async fn test_upsert_keeps_existing_email_when_none_given() {
        let store = MemoryStore::new();
        let id = UserId::new();
        store.upsert(id, Some("a@ku.th".into())).await.expect("upsert");
        let user = store.upsert(id, None).await.expect("upsert");
        assert_eq!(user.email.as_deref(), Some("a@ku.th"));
        assert!(store.exists(id).await.expect("exists"));
    }

    #[tokio::test]
    async fn test_catalog_sorted_by_name() {
        let store = MemoryStore::with_default_interests();
        let all = store.list_all().await.expect("list");
        assert_eq!(all.len(), super::super::DEFAULT_INTERESTS.len());
        assert!(all.windows(2).all(|w| w[0].name <= w[1].name));
    }

    #[tokio::test]
    async fn test_settings_patch_leaves_other_fields() {
        let store = MemoryStore::new();
        let id = user_with_profile(&store, "Ann", vec![1.0, 0.0]).await;
        let updated = store
            .update(
                id,
                SettingsPatch {
                    profile_visibility: Some(Visibility::Private),
                    ..SettingsPatch::default()
                },
            )
            .await
            .expect("update")
            .expect("row");
        assert_eq!(updated.profile_visibility, Visibility::Private);
        assert_eq!(updated.contact_info_visibility, Visibility::Connected);
        assert!(updated.noti_new_message);
    }

    #[tokio::test]
    async fn test_settings_update_without_row_is_none() {
        let store = MemoryStore::new();
        let result = store
            .update(UserId::new(), SettingsPatch::default())
            .await
            .expect("update");
        assert!(result.is_none());
    }
}
