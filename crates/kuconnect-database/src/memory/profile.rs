//! Profiles, embeddings and in-process ranking.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;

use kuconnect_core::error::AppError;
use kuconnect_core::result::AppResult;
use kuconnect_core::types::{InterestId, PageRequest, ProfileId, UserId};
use kuconnect_entity::profile::{Embedding, Profile, ProfileFields, RankedProfile};
use kuconnect_entity::settings::{Settings, Visibility};

use super::{MemoryState, MemoryStore};
use crate::store::ProfileStore;

fn check_interests(state: &MemoryState, ids: &[InterestId]) -> AppResult<()> {
    match ids
        .iter()
        .find(|id| !state.interests.iter().any(|i| i.id == **id))
    {
        Some(missing) => Err(AppError::not_found(format!(
            "Interest {missing} does not exist"
        ))),
        None => Ok(()),
    }
}

/// Similarity descending with missing similarity last, then user id.
fn rank_order(a: &RankedProfile, b: &RankedProfile) -> Ordering {
    let by_similarity = match (a.similarity, b.similarity) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_similarity.then_with(|| a.profile.user_id.cmp(&b.profile.user_id))
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn create_profile(
        &self,
        user_id: UserId,
        fields: ProfileFields,
        interest_ids: &[InterestId],
        embedding: &Embedding,
    ) -> AppResult<Profile> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&user_id) {
            return Err(AppError::not_found(format!("User {user_id} does not exist")));
        }
        if state.profiles.contains_key(&user_id) {
            return Err(AppError::conflict("Profile already exists"));
        }
        check_interests(&state, interest_ids)?;

        let now = Utc::now();
        let profile = fields.into_profile(ProfileId::new(), user_id, now);
        state.profiles.insert(user_id, profile.clone());
        state.embeddings.insert(user_id, embedding.clone());
        for id in interest_ids {
            state.user_interests.insert((user_id, *id));
        }
        state
            .settings
            .entry(user_id)
            .or_insert_with(|| Settings::defaults_for(user_id, now));
        Ok(profile)
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        fields: ProfileFields,
    ) -> AppResult<Option<Profile>> {
        let mut state = self.state.write().await;
        Ok(state.profiles.get_mut(&user_id).map(|profile| {
            fields.apply_to(profile, Utc::now());
            profile.clone()
        }))
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Profile>> {
        Ok(self.state.read().await.profiles.get(&user_id).cloned())
    }

    async fn find_by_users(&self, user_ids: &[UserId]) -> AppResult<Vec<Profile>> {
        let state = self.state.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|id| state.profiles.get(id).cloned())
            .collect())
    }

    async fn replace_interests(
        &self,
        user_id: UserId,
        interest_ids: &[InterestId],
        embedding: Option<&Embedding>,
    ) -> AppResult<()> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        check_interests(state, interest_ids)?;

        state.user_interests.retain(|(owner, _)| *owner != user_id);
        for id in interest_ids {
            state.user_interests.insert((user_id, *id));
        }
        if let Some(embedding) = embedding {
            if let Some(profile) = state.profiles.get_mut(&user_id) {
                profile.updated_at = Utc::now();
                state.embeddings.insert(user_id, embedding.clone());
            }
        }
        Ok(())
    }

    async fn rank_candidates(
        &self,
        viewer: UserId,
        page: PageRequest,
    ) -> AppResult<Vec<RankedProfile>> {
        let state = self.state.read().await;
        let viewer_embedding = state.embeddings.get(&viewer);

        let mut ranked: Vec<RankedProfile> = state
            .profiles
            .values()
            .filter(|p| p.user_id != viewer)
            .filter(|p| state.interaction(viewer, p.user_id).is_none())
            .filter_map(|p| {
                let settings = state.settings.get(&p.user_id)?;
                if settings.profile_visibility != Visibility::Public {
                    return None;
                }
                let similarity = viewer_embedding.and_then(|v| {
                    state
                        .embeddings
                        .get(&p.user_id)
                        .and_then(|e| v.cosine_similarity(e))
                });
                Some(RankedProfile {
                    profile: p.clone(),
                    contact_info_visibility: settings.contact_info_visibility,
                    similarity,
                })
            })
            .collect();

        ranked.sort_by(rank_order);
        Ok(page.apply(ranked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuconnect_core::error::ErrorKind;
    use kuconnect_entity::settings::SettingsPatch;

    use crate::memory::test_support::user_with_profile;
    use crate::store::{InteractionStore, InterestStore, SettingsStore, UserStore};

    fn page(page: i64, size: i64) -> PageRequest {
        PageRequest::try_new(page, size, 100).expect("valid page")
    }

    #[tokio::test]
    async fn test_second_create_conflicts_and_changes_nothing() {
        let store = MemoryStore::with_default_interests();
        let user = user_with_profile(&store, "Ann", vec![1.0, 0.0]).await;
        let before = ProfileStore::find_by_user(&store, user).await.expect("find");

        let err = store
            .create_profile(
                user,
                ProfileFields {
                    display_name: "Other".into(),
                    ..ProfileFields::default()
                },
                &[],
                &Embedding::new(vec![0.0, 1.0]),
            )
            .await
            .expect_err("duplicate");
        assert_eq!(err.kind, ErrorKind::Conflict);

        let after = ProfileStore::find_by_user(&store, user).await.expect("find");
        assert_eq!(before, after);
        assert_eq!(
            store.embedding_of(user).await,
            Some(Embedding::new(vec![1.0, 0.0]))
        );
    }

    #[tokio::test]
    async fn test_create_with_unknown_interest_writes_nothing() {
        let store = MemoryStore::with_default_interests();
        let user = UserId::new();
        UserStore::upsert(&store, user, None).await.expect("user");

        let err = store
            .create_profile(
                user,
                ProfileFields::default(),
                &[InterestId::new()],
                &Embedding::new(vec![1.0]),
            )
            .await
            .expect_err("unknown interest");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(ProfileStore::find_by_user(&store, user).await.expect("find").is_none());
        assert!(SettingsStore::find_by_user(&store, user).await.expect("find").is_none());
    }

    #[tokio::test]
    async fn test_replace_interests_without_embedding_keeps_vector() {
        let store = MemoryStore::with_default_interests();
        let user = user_with_profile(&store, "Ann", vec![1.0, 0.0]).await;
        let coding = store.interest_named("Coding").await.expect("seeded");

        store
            .replace_interests(user, &[coding.id], None)
            .await
            .expect("replace");
        store.replace_interests(user, &[], None).await.expect("replace");

        assert!(InterestStore::find_by_user(&store, user).await.expect("list").is_empty());
        assert_eq!(
            store.embedding_of(user).await,
            Some(Embedding::new(vec![1.0, 0.0]))
        );
    }

    #[tokio::test]
    async fn test_ranking_orders_by_similarity_and_excludes_judged_and_hidden() {
        let store = MemoryStore::new();
        let viewer = user_with_profile(&store, "Viewer", vec![1.0, 0.0]).await;
        let close = user_with_profile(&store, "Close", vec![0.9, 0.1]).await;
        let far = user_with_profile(&store, "Far", vec![0.0, 1.0]).await;
        let judged = user_with_profile(&store, "Judged", vec![1.0, 0.0]).await;
        let hidden = user_with_profile(&store, "Hidden", vec![1.0, 0.0]).await;

        store.record(viewer, judged, false).await.expect("record");
        SettingsStore::update(
            &store,
            hidden,
            SettingsPatch {
                profile_visibility: Some(Visibility::Connected),
                ..SettingsPatch::default()
            },
        )
        .await
        .expect("update");

        let ranked = store.rank_candidates(viewer, page(1, 10)).await.expect("rank");
        let ids: Vec<UserId> = ranked.iter().map(|r| r.profile.user_id).collect();
        assert_eq!(ids, vec![close, far]);
        assert!(ranked[0].similarity > ranked[1].similarity);
    }

    #[tokio::test]
    async fn test_ranking_pages_partition_the_order() {
        let store = MemoryStore::new();
        let viewer = user_with_profile(&store, "Viewer", vec![1.0, 0.0]).await;
        for n in 0..12 {
            let angle = n as f32 * 0.1;
            user_with_profile(&store, &format!("C{n}"), vec![angle.cos(), angle.sin()]).await;
        }

        let all = store.rank_candidates(viewer, page(1, 100)).await.expect("rank");
        let second = store.rank_candidates(viewer, page(2, 5)).await.expect("rank");
        let past_end = store.rank_candidates(viewer, page(4, 5)).await.expect("rank");

        assert_eq!(all.len(), 12);
        assert_eq!(second, all[5..10].to_vec());
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_missing_embeddings_rank_last_with_ties_present_once() {
        let store = MemoryStore::new();
        let viewer = user_with_profile(&store, "Viewer", vec![1.0, 0.0]).await;
        let zero_a = user_with_profile(&store, "ZeroA", vec![0.0, 0.0]).await;
        let zero_b = user_with_profile(&store, "ZeroB", vec![0.0, 0.0]).await;
        let real = user_with_profile(&store, "Real", vec![0.5, 0.5]).await;

        let ranked = store.rank_candidates(viewer, page(1, 10)).await.expect("rank");
        let ids: Vec<UserId> = ranked.iter().map(|r| r.profile.user_id).collect();
        assert_eq!(ids[0], real);
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&zero_a) && ids.contains(&zero_b));
        assert!(ranked[1].similarity.is_none() && ranked[2].similarity.is_none());
    }
}
