//! Embedding generator configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which text→vector function profiles are embedded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderKind {
    /// Nomic Atlas text embedding API.
    #[default]
    Nomic,
    /// Deterministic local feature hashing (no network).
    Hashing,
}

/// Embedding generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Provider implementation.
    #[serde(default)]
    pub provider: EmbeddingProviderKind,
    /// Endpoint for the remote provider.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// API key for the remote provider.
    #[serde(default)]
    pub api_key: String,
    /// Remote model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Task type hint sent to the remote provider.
    #[serde(default = "default_task_type")]
    pub task_type: String,
    /// Vector dimensionality; must match the `profiles.embedding` column.
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
    /// Remote request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::default(),
            api_url: default_api_url(),
            api_key: String::new(),
            model: default_model(),
            task_type: default_task_type(),
            dimensions: default_dimensions(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl EmbeddingConfig {
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.dimensions == 0 {
            return Err(AppError::configuration(
                "embedding.dimensions must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn default_api_url() -> String {
    "https://api-atlas.nomic.ai/v1/embedding/text".to_string()
}

fn default_model() -> String {
    "nomic-embed-text-v1.5".to_string()
}

fn default_task_type() -> String {
    "clustering".to_string()
}

fn default_dimensions() -> usize {
    768
}

fn default_timeout() -> u64 {
    10
}
