//! Text-to-vector embedding providers.
//!
//! Profiles are embedded from a short prompt listing their interests. The
//! provider is chosen from configuration at startup.

pub mod hashing;
pub mod nomic;

use std::sync::Arc;

use async_trait::async_trait;

use kuconnect_core::config::{EmbeddingConfig, EmbeddingProviderKind};
use kuconnect_core::result::AppResult;
use kuconnect_entity::profile::{Embedding, ProfileFields};

pub use hashing::HashingEmbedder;
pub use nomic::NomicEmbedder;

/// Opaque text to fixed-dimension vector function.
#[async_trait]
pub trait Embedder: Send + Sync + std::fmt::Debug {
    /// Embed one prompt.
    async fn embed(&self, text: &str) -> AppResult<Embedding>;

    /// Number of components every returned vector has.
    fn dimensions(&self) -> usize;
}

/// Prompt for a non-empty interest set.
pub fn interest_prompt<S: AsRef<str>>(names: &[S]) -> String {
    let joined: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    format!("I am interested in {}", joined.join(", "))
}

/// Prompt for a profile created without interests.
pub fn background_prompt(fields: &ProfileFields) -> String {
    match (fields.faculty.as_deref(), fields.department.as_deref()) {
        (Some(faculty), Some(department)) => {
            format!("I study {department} in the faculty of {faculty}")
        }
        (Some(faculty), None) => format!("I study in the faculty of {faculty}"),
        (None, Some(department)) => format!("I study {department}"),
        (None, None) => "I am a university student".to_string(),
    }
}

/// Build the configured provider.
pub fn build_embedder(config: &EmbeddingConfig) -> AppResult<Arc<dyn Embedder>> {
    Ok(match config.provider {
        EmbeddingProviderKind::Nomic => Arc::new(NomicEmbedder::new(config)?),
        EmbeddingProviderKind::Hashing => Arc::new(HashingEmbedder::new(config.dimensions)),
    })
}
