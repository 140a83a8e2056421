//! Profiles, their embeddings, and candidate ranking.

use async_trait::async_trait;

use kuconnect_core::result::AppResult;
use kuconnect_core::types::{InterestId, PageRequest, UserId};
use kuconnect_entity::profile::{Embedding, Profile, ProfileFields, RankedProfile};

/// Profile persistence.
#[async_trait]
pub trait ProfileStore: Send + Sync + std::fmt::Debug {
    /// Insert the profile, its interests and default settings atomically.
    ///
    /// Fails with `Conflict` when the user already has a profile, in which
    /// case nothing is written.
    async fn create_profile(
        &self,
        user_id: UserId,
        fields: ProfileFields,
        interest_ids: &[InterestId],
        embedding: &Embedding,
    ) -> AppResult<Profile>;

    /// Overwrite the editable fields. `None` when the user has no profile.
    async fn update_profile(
        &self,
        user_id: UserId,
        fields: ProfileFields,
    ) -> AppResult<Option<Profile>>;

    /// The profile owned by `user_id`.
    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Profile>>;

    /// Profiles owned by any of the given users.
    async fn find_by_users(&self, user_ids: &[UserId]) -> AppResult<Vec<Profile>>;

    /// Replace the whole interest set and, when given, the embedding, atomically.
    async fn replace_interests(
        &self,
        user_id: UserId,
        interest_ids: &[InterestId],
        embedding: Option<&Embedding>,
    ) -> AppResult<()>;

    /// One page of public profiles the viewer has not judged, most similar first.
    ///
    /// Ties and missing embeddings order by user id so pages never overlap.
    async fn rank_candidates(
        &self,
        viewer: UserId,
        page: PageRequest,
    ) -> AppResult<Vec<RankedProfile>>;
}
