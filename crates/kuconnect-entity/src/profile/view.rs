//! Read models assembled from profile rows.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kuconnect_core::types::{ProfileId, UserId};

use super::model::{ContactInfo, Profile};
use crate::interest::Interest;
use crate::settings::{Settings, Visibility};

/// A profile as another user sees it. Contact handles may be withheld.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    /// Row id.
    pub id: ProfileId,
    /// Owner.
    pub user_id: UserId,
    /// Name shown to other users.
    pub display_name: String,
    /// Free-form introduction.
    pub bio: Option<String>,
    /// Avatar reference.
    pub image: Option<String>,
    /// Date of birth.
    pub birthdate: Option<NaiveDate>,
    /// Faculty name.
    pub faculty: Option<String>,
    /// Department name.
    pub department: Option<String>,
    /// Year of study.
    pub year: Option<i16>,
    /// Social handles, present only when visible to the viewer.
    #[serde(flatten)]
    pub contact: Option<ContactInfo>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last changed.
    pub updated_at: DateTime<Utc>,
}

impl ProfileView {
    /// Project a profile, keeping contact handles only if `show_contact`.
    pub fn from_profile(profile: Profile, show_contact: bool) -> Self {
        let contact = show_contact.then(|| profile.contact());
        Self {
            id: profile.id,
            user_id: profile.user_id,
            display_name: profile.display_name,
            bio: profile.bio,
            image: profile.image,
            birthdate: profile.birthdate,
            faculty: profile.faculty,
            department: profile.department,
            year: profile.year,
            contact,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// One row of the ranking query.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RankedProfile {
    /// The candidate.
    #[sqlx(flatten)]
    pub profile: Profile,
    /// The candidate's contact-info visibility.
    pub contact_info_visibility: Visibility,
    /// Cosine similarity to the viewer; `None` when either embedding is missing.
    pub similarity: Option<f64>,
}

/// A ranked candidate returned to the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    /// The candidate, contact-filtered.
    #[serde(flatten)]
    pub profile: ProfileView,
    /// Cosine similarity to the viewer.
    pub similarity: Option<f64>,
    /// The candidate's interests.
    pub interests: Vec<Interest>,
}

/// Another user's profile with interests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetail {
    /// The profile, contact-filtered.
    #[serde(flatten)]
    pub profile: ProfileView,
    /// Its interests.
    pub interests: Vec<Interest>,
}

/// The caller's own profile, unfiltered, with interests and settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnProfile {
    /// The profile.
    #[serde(flatten)]
    pub profile: Profile,
    /// Its interests.
    pub interests: Vec<Interest>,
    /// The owner's settings.
    pub settings: Settings,
}
