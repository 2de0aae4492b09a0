//! # Text Embeddings
//!
//! This crate defines the embedding service interface used for both corpus chunks and
//! queries. One service instance is constructed at startup and shared for the whole
//! process, so chunk and query vectors always come from the same model and dimension.

use async_trait::async_trait;

mod config;
pub use config::{EmbeddingProvider, EnvEmbeddingConfig};

/// Service for generating text embeddings.
///
/// Implementations must be reentrant: the same instance is called concurrently from
/// independent sessions.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Generates an embedding vector for a single text string.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error>;

    /// Generates embedding vectors for multiple texts, one per input, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error>;
}
