//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kuconnect_entity::profile::CandidateProfile;

/// GET /api/profiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesResponse {
    /// Ranked page of candidates.
    pub profiles: Vec<CandidateProfile>,
}

/// Id of a newly created resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// Resource id.
    pub id: Uuid,
}

/// PATCH /api/notifications/read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedResponse {
    /// Rows changed.
    pub updated: u64,
}

/// GET /healthz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `unavailable`.
    pub status: String,
    /// Crate version.
    pub version: String,
}
