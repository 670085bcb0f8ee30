//! Embedding provider trait

use async_trait::async_trait;

use crate::Result;

/// Trait for embedding providers (e.g., watsonx.ai embeddings)
///
/// An embedding provider maps text to a fixed-dimension vector. Providers
/// are expected to be deterministic per input text and to return normalized
/// vectors so that cosine similarity reduces to a dot product.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, preserving input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// The dimension of the vectors this provider produces
    fn dimension(&self) -> usize;
}
