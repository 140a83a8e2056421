//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kuconnect_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built from verified bearer claims and passed into service methods so
/// that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// Login email from the token, if present.
    pub email: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, email: Option<String>) -> Self {
        Self {
            user_id,
            email,
            request_time: Utc::now(),
        }
    }

    /// Whether `other` is the acting user.
    pub fn is_self(&self, other: UserId) -> bool {
        self.user_id == other
    }
}
