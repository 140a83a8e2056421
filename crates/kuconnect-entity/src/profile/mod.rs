//! Profile domain entities.

pub mod embedding;
pub mod model;
pub mod view;

pub use embedding::Embedding;
pub use model::{ContactInfo, Profile, ProfileFields};
pub use view::{CandidateProfile, OwnProfile, ProfileDetail, ProfileView, RankedProfile};
