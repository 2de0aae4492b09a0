//! # OpenAI Embedding Service
//!
//! [`EmbeddingService`] backed by an OpenAI-compatible `/embeddings` endpoint.
//! Used when `EMBEDDING_PROVIDER=openai`; the local fastembed provider is the default.
//!
//! ## Supported Models
//!
//! - `text-embedding-3-small`: 1536 dimensions (default)
//! - `text-embedding-3-large`: 3072 dimensions
//! - `text-embedding-ada-002`: 1536 dimensions (legacy)
//!
//! ## External Interactions
//!
//! - **OpenAI API**: HTTPS request per call; subject to rate limits and billing.
//! - Requests are bounded by a timeout so a stalled endpoint surfaces as an error.

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::{CreateEmbeddingRequestArgs, EmbeddingInput},
    Client,
};
use async_trait::async_trait;
use embedding::EmbeddingService;
use tracing::{debug, info, instrument, warn};

/// Default model when none is configured.
pub const DEFAULT_MODEL: &str = "text-embedding-3-small";

const EMBED_TIMEOUT: Duration = Duration::from_secs(30);
const EMBED_BATCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Returns the vector dimension produced by a known OpenAI embedding model.
pub fn dimension_for_model(model: &str) -> usize {
    match model {
        "text-embedding-3-large" => 3072,
        _ => 1536,
    }
}

/// OpenAI embedding service. Holds the async-openai client and model name.
#[derive(Debug, Clone)]
pub struct OpenAIEmbedding {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIEmbedding {
    /// Creates a service for `model`. An empty `api_key` falls back to `OPENAI_API_KEY`.
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_base_url(api_key, model, None)
    }

    /// Creates a service sending requests to `base_url` when given (OpenAI-compatible endpoints).
    pub fn new_with_base_url(api_key: String, model: String, base_url: Option<&str>) -> Self {
        let api_key = if api_key.is_empty() {
            std::env::var("OPENAI_API_KEY").unwrap_or_default()
        } else {
            api_key
        };

        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = base_url.filter(|s| !s.is_empty()) {
            config = config.with_api_base(url);
        }

        Self {
            client: Client::with_config(config),
            model,
        }
    }

    /// Creates a service with [`DEFAULT_MODEL`].
    pub fn with_api_key(api_key: String) -> Self {
        Self::new(api_key, DEFAULT_MODEL.to_string())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one embeddings request and checks that one vector came back per input.
    async fn request(
        &self,
        input: EmbeddingInput,
        expected: usize,
        timeout: Duration,
    ) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(self.model.clone())
            .input(input)
            .build()?;

        let embeddings = self.client.embeddings();
        let response = match tokio::time::timeout(timeout, embeddings.create(request)).await {
            Ok(Ok(r)) => r,
            Ok(Err(e)) => {
                warn!(error = %e, "OpenAI embeddings request failed");
                return Err(e.into());
            }
            Err(_) => {
                warn!(timeout_secs = timeout.as_secs(), "OpenAI embeddings request timed out");
                anyhow::bail!(
                    "OpenAI embeddings request timed out after {} seconds",
                    timeout.as_secs()
                );
            }
        };
        debug!("OpenAI embeddings response received");

        let mut data = response.data;
        // The API echoes each input's position; do not rely on response order.
        data.sort_by_key(|item| item.index);
        let vectors: Vec<Vec<f32>> = data.into_iter().map(|item| item.embedding).collect();

        if vectors.len() != expected {
            warn!(expected, got = vectors.len(), "OpenAI embeddings count mismatch");
            anyhow::bail!("Expected {} embeddings, got {}", expected, vectors.len());
        }
        Ok(vectors)
    }
}

#[async_trait]
impl EmbeddingService for OpenAIEmbedding {
    #[instrument(skip(self, text), fields(model = %self.model, text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        info!("step: embedding OpenAI embed request");
        let mut vectors = self
            .request(EmbeddingInput::String(text.to_string()), 1, EMBED_TIMEOUT)
            .await?;
        let vector = vectors
            .pop()
            .ok_or_else(|| anyhow::anyhow!("No embedding in response"))?;
        info!(dimension = vector.len(), "step: embedding OpenAI embed done");
        Ok(vector)
    }

    #[instrument(skip(self, texts), fields(model = %self.model, batch_size = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        if texts.is_empty() {
            debug!("OpenAI embed_batch empty input, skipping");
            return Ok(vec![]);
        }
        info!("step: embedding OpenAI embed_batch request");
        let vectors = self
            .request(
                EmbeddingInput::StringArray(texts.to_vec()),
                texts.len(),
                EMBED_BATCH_TIMEOUT,
            )
            .await?;
        info!(
            count = vectors.len(),
            dimension = vectors.first().map(|v| v.len()).unwrap_or(0),
            "step: embedding OpenAI embed_batch done"
        );
        Ok(vectors)
    }
}
