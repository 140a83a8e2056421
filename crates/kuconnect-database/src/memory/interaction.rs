//! The like/dislike ledger.

use async_trait::async_trait;
use chrono::Utc;

use kuconnect_core::error::AppError;
use kuconnect_core::result::AppResult;
use kuconnect_core::types::UserId;
use kuconnect_entity::interaction::Interaction;
use kuconnect_entity::profile::Profile;

use super::{MemoryState, MemoryStore};
use crate::store::InteractionStore;

/// Likers of `user_id` it has not judged back, newest like first.
fn pending_likers(state: &MemoryState, user_id: UserId) -> impl Iterator<Item = &Profile> {
    state
        .interactions
        .iter()
        .rev()
        .filter(move |i| i.to_user_id == user_id && i.liked)
        .filter(move |i| state.interaction(user_id, i.from_user_id).is_none())
        .filter_map(move |i| state.profiles.get(&i.from_user_id))
}

#[async_trait]
impl InteractionStore for MemoryStore {
    async fn record(&self, from: UserId, to: UserId, liked: bool) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if from == to {
            return Err(AppError::validation("An interaction needs two different users"));
        }
        if !state.users.contains_key(&from) || !state.users.contains_key(&to) {
            return Err(AppError::not_found("record interaction: user does not exist"));
        }
        if state.interaction(from, to).is_some() {
            return Ok(false);
        }
        let now = Utc::now();
        state.interactions.push(Interaction {
            from_user_id: from,
            to_user_id: to,
            liked,
            created_at: now,
            updated_at: now,
        });
        Ok(true)
    }

    async fn find(&self, from: UserId, to: UserId) -> AppResult<Option<Interaction>> {
        Ok(self.state.read().await.interaction(from, to).cloned())
    }

    async fn is_connected(&self, a: UserId, b: UserId) -> AppResult<bool> {
        let state = self.state.read().await;
        Ok(state.likes(a, b) && state.likes(b, a))
    }

    async fn find_pending_likes(&self, user_id: UserId, limit: i64) -> AppResult<Vec<Profile>> {
        let state = self.state.read().await;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(pending_likers(&state, user_id).take(limit).cloned().collect())
    }

    async fn count_pending_likes(&self, user_id: UserId) -> AppResult<i64> {
        let state = self.state.read().await;
        Ok(pending_likers(&state, user_id).count() as i64)
    }
}
