//! Profile entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kuconnect_core::types::{ProfileId, UserId};

/// A user's public card. One per user.
///
/// The embedding column is deliberately absent; it is written through
/// dedicated store operations and only read inside ranking queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Row id.
    pub id: ProfileId,
    /// Owner.
    pub user_id: UserId,
    /// Name shown to other users.
    pub display_name: String,
    /// Free-form introduction.
    pub bio: Option<String>,
    /// Avatar reference (URL or storage key).
    pub image: Option<String>,
    /// Date of birth.
    pub birthdate: Option<NaiveDate>,
    /// Faculty name.
    pub faculty: Option<String>,
    /// Department name.
    pub department: Option<String>,
    /// Year of study, 1 through 8.
    pub year: Option<i16>,
    /// LINE handle.
    pub line: Option<String>,
    /// Facebook handle.
    pub facebook: Option<String>,
    /// Instagram handle.
    pub instagram: Option<String>,
    /// Any other contact channel.
    pub other: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// The social handles of this profile.
    pub fn contact(&self) -> ContactInfo {
        ContactInfo {
            line: self.line.clone(),
            facebook: self.facebook.clone(),
            instagram: self.instagram.clone(),
            other: self.other.clone(),
        }
    }
}

/// Social handles, shown only when the owner's contact visibility allows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    /// LINE handle.
    pub line: Option<String>,
    /// Facebook handle.
    pub facebook: Option<String>,
    /// Instagram handle.
    pub instagram: Option<String>,
    /// Any other contact channel.
    pub other: Option<String>,
}

/// Editable profile fields, shared by create and full update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
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
    /// LINE handle.
    pub line: Option<String>,
    /// Facebook handle.
    pub facebook: Option<String>,
    /// Instagram handle.
    pub instagram: Option<String>,
    /// Any other contact channel.
    pub other: Option<String>,
}

impl ProfileFields {
    /// Build a full profile row from these fields.
    pub fn into_profile(self, id: ProfileId, user_id: UserId, now: DateTime<Utc>) -> Profile {
        Profile {
            id,
            user_id,
            display_name: self.display_name,
            bio: self.bio,
            image: self.image,
            birthdate: self.birthdate,
            faculty: self.faculty,
            department: self.department,
            year: self.year,
            line: self.line,
            facebook: self.facebook,
            instagram: self.instagram,
            other: self.other,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable columns of an existing profile.
    pub fn apply_to(self, profile: &mut Profile, now: DateTime<Utc>) {
        profile.display_name = self.display_name;
        profile.bio = self.bio;
        profile.image = self.image;
        profile.birthdate = self.birthdate;
        profile.faculty = self.faculty;
        profile.department = self.department;
        profile.year = self.year;
        profile.line = self.line;
        profile.facebook = self.facebook;
        profile.instagram = self.instagram;
        profile.other = self.other;
        profile.updated_at = now;
    }
}
