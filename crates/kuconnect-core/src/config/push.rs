//! Web-push delivery configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// How web-push payloads leave the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PushProviderKind {
    /// Push is logged and skipped.
    #[default]
    Disabled,
    /// Payloads are posted to a push relay that performs VAPID signing.
    Relay,
}

/// Web-push configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// Delivery mode.
    #[serde(default)]
    pub provider: PushProviderKind,
    /// Relay endpoint receiving `{ subscription, payload }` documents.
    #[serde(default)]
    pub relay_url: String,
    /// Public VAPID key handed to browsers when they subscribe.
    #[serde(default)]
    pub vapid_public_key: String,
    /// VAPID subject (`mailto:` or URL).
    #[serde(default = "default_subject")]
    pub vapid_subject: String,
    /// Per-endpoint request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            provider: PushProviderKind::default(),
            relay_url: String::new(),
            vapid_public_key: String::new(),
            vapid_subject: default_subject(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl PushConfig {
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.provider == PushProviderKind::Relay && self.relay_url.is_empty() {
            return Err(AppError::configuration(
                "push.relay_url is required when push.provider = \"relay\"",
            ));
        }
        Ok(())
    }
}

fn default_subject() -> String {
    "mailto:admin@kuconnect.local".to_string()
}

fn default_timeout() -> u64 {
    5
}
