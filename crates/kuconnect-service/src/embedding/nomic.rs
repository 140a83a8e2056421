//! Nomic Atlas text embedding API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use kuconnect_core::config::EmbeddingConfig;
use kuconnect_core::error::{AppError, ErrorKind};
use kuconnect_core::result::AppResult;
use kuconnect_entity::profile::Embedding;

use super::Embedder;

/// Calls `POST {api_url}` with a bearer API key.
#[derive(Debug, Clone)]
pub struct NomicEmbedder {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    task_type: String,
    dimensions: usize,
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    texts: [&'a str; 1],
    task_type: &'a str,
    dimensionality: usize,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl NomicEmbedder {
    /// Build a client from configuration.
    pub fn new(config: &EmbeddingConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build embedding HTTP client",
                    e,
                )
            })?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            task_type: config.task_type.clone(),
            dimensions: config.dimensions,
        })
    }
}

#[async_trait]
impl Embedder for NomicEmbedder {
    async fn embed(&self, text: &str) -> AppResult<Embedding> {
        let request = EmbedRequest {
            model: &self.model,
            texts: [text],
            task_type: &self.task_type,
            dimensionality: self.dimensions,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Embedding request failed", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Embedding API returned an error status");
            return Err(AppError::external(format!(
                "Embedding API responded with {status}"
            )));
        }

        let body: EmbedResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Embedding API returned an unreadable body",
                e,
            )
        })?;

        let vector = body
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external("Embedding API returned no vectors"))?;
        if vector.len() != self.dimensions {
            return Err(AppError::external(format!(
                "Embedding API returned {} dimensions, expected {}",
                vector.len(),
                self.dimensions
            )));
        }

        debug!(model = %self.model, "Prompt embedded");
        Ok(Embedding::new(vector))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
