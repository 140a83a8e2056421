//! Fixed-dimension embedding vectors.

use serde::{Deserialize, Serialize};

/// A profile embedding produced from interest text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    /// Wrap raw vector components.
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// Number of components.
    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    /// Borrow the components.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// pgvector text literal, e.g. `[0.1,0.2,0.3]`, bound as `$n::text::vector`.
    pub fn to_pg_literal(&self) -> String {
        let parts: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        format!("[{}]", parts.join(","))
    }

    /// Cosine similarity, matching pgvector's `1 - (a <=> b)`.
    ///
    /// `None` when the dimensions differ or either vector has zero norm.
    pub fn cosine_similarity(&self, other: &Embedding) -> Option<f64> {
        if self.0.len() != other.0.len() || self.0.is_empty() {
            return None;
        }
        let mut dot = 0.0f64;
        let mut norm_a = 0.0f64;
        let mut norm_b = 0.0f64;
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            let (a, b) = (f64::from(*a), f64::from(*b));
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }
        if norm_a == 0.0 || norm_b == 0.0 {
            return None;
        }
        Some(dot / (norm_a.sqrt() * norm_b.sqrt()))
    }
}
