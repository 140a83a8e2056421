//! Similarity-ordered candidate pages.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use kuconnect_core::error::AppError;
use kuconnect_core::result::AppResult;
use kuconnect_core::types::{PageRequest, UserId};
use kuconnect_database::store::{InterestStore, ProfileStore};
use kuconnect_entity::interest::Interest;
use kuconnect_entity::profile::{CandidateProfile, ProfileView};
use kuconnect_entity::settings::Visibility;

use crate::context::RequestContext;

/// Produces pages of candidates for a viewer.
///
/// Excludes the viewer, everyone the viewer has already judged and every
/// non-public profile. Contact handles survive only on candidates whose
/// contact visibility is public.
#[derive(Debug, Clone)]
pub struct CandidateRanker {
    profiles: Arc<dyn ProfileStore>,
    interests: Arc<dyn InterestStore>,
}

impl CandidateRanker {
    /// Creates a new ranker.
    pub fn new(profiles: Arc<dyn ProfileStore>, interests: Arc<dyn InterestStore>) -> Self {
        Self {
            profiles,
            interests,
        }
    }

    /// One page of candidates for the caller.
    pub async fn rank(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<Vec<CandidateProfile>> {
        if self.profiles.find_by_user(ctx.user_id).await?.is_none() {
            return Err(AppError::not_found(
                "Create a profile before browsing candidates",
            ));
        }

        let ranked = self.profiles.rank_candidates(ctx.user_id, page).await?;
        let ids: Vec<UserId> = ranked.iter().map(|r| r.profile.user_id).collect();
        let mut interests = self.interests_by_user(&ids).await?;

        debug!(
            viewer = %ctx.user_id,
            page = page.page,
            size = page.size,
            returned = ranked.len(),
            "Ranked candidates"
        );

        Ok(ranked
            .into_iter()
            .map(|r| {
                let user_id = r.profile.user_id;
                let show_contact = r.contact_info_visibility == Visibility::Public;
                CandidateProfile {
                    profile: ProfileView::from_profile(r.profile, show_contact),
                    similarity: r.similarity,
                    interests: interests.remove(&user_id).unwrap_or_default(),
                }
            })
            .collect())
    }

    async fn interests_by_user(&self, ids: &[UserId]) -> AppResult<HashMap<UserId, Vec<Interest>>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut grouped: HashMap<UserId, Vec<Interest>> = HashMap::new();
        for row in self.interests.find_by_users(ids).await? {
            grouped.entry(row.user_id).or_default().push(row.into());
        }
        Ok(grouped)
    }
}
