//! # Local Embedding Service
//!
//! [`EmbeddingService`] backed by a sentence-embedding model running in-process through
//! fastembed (ONNX Runtime). The default model is `all-MiniLM-L6-v2` (384 dimensions).
//!
//! The model is loaded once in [`FastEmbedService::new`]; files are downloaded to the
//! cache directory on first use. Inference runs on the blocking thread pool so it does
//! not stall the async runtime, and the model is shared read-only across calls.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use embedding::EmbeddingService;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::{debug, info, instrument};

/// Default model name.
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

/// Batch size handed to fastembed for corpus embedding.
const BATCH_SIZE: usize = 64;

/// Maps a configured model name to a fastembed model and its output dimension.
pub fn resolve_model(name: &str) -> anyhow::Result<(EmbeddingModel, usize)> {
    match name {
        "all-MiniLM-L6-v2" | "sentence-transformers/all-MiniLM-L6-v2" => {
            Ok((EmbeddingModel::AllMiniLML6V2, 384))
        }
        "bge-small-en-v1.5" | "BAAI/bge-small-en-v1.5" => Ok((EmbeddingModel::BGESmallENV15, 384)),
        "bge-base-en-v1.5" | "BAAI/bge-base-en-v1.5" => Ok((EmbeddingModel::BGEBaseENV15, 768)),
        other => anyhow::bail!("Unsupported local embedding model: {}", other),
    }
}

/// In-process embedding model.
#[derive(Clone)]
pub struct FastEmbedService {
    model: Arc<TextEmbedding>,
    model_name: String,
    dimension: usize,
}

impl FastEmbedService {
    /// Loads `model_name` (default [`DEFAULT_MODEL`]), caching files under `cache_dir` if given.
    pub fn new(model_name: Option<&str>, cache_dir: Option<&str>) -> anyhow::Result<Self> {
        let model_name = model_name.unwrap_or(DEFAULT_MODEL).to_string();
        let (model, dimension) = resolve_model(&model_name)?;

        info!(model = %model_name, dimension, "step: embedding load local model");
        let mut options = InitOptions {
            model_name: model,
            show_download_progress: false,
            ..Default::default()
        };
        if let Some(dir) = cache_dir {
            options.cache_dir = PathBuf::from(dir);
        }

        let model = TextEmbedding::try_new(options)
            .map_err(|e| anyhow::anyhow!("Failed to initialize embedding model {}: {}", model_name, e))?;
        info!(model = %model_name, "step: embedding local model ready");

        Ok(Self {
            model: Arc::new(model),
            model_name,
            dimension,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    async fn run(&self, texts: Vec<String>) -> anyhow::Result<Vec<Vec<f32>>> {
        let expected = texts.len();
        let model = Arc::clone(&self.model);
        let vectors = tokio::task::spawn_blocking(move || model.embed(texts, Some(BATCH_SIZE)))
            .await
            .map_err(|e| anyhow::anyhow!("Embedding task failed: {}", e))??;

        if vectors.len() != expected {
            anyhow::bail!("Expected {} embeddings, got {}", expected, vectors.len());
        }
        Ok(vectors)
    }
}

#[async_trait]
impl EmbeddingService for FastEmbedService {
    #[instrument(skip(self, text), fields(model = %self.model_name, text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        let vector = self
            .run(vec![text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("No embedding produced"))?;
        debug!(dimension = vector.len(), "step: embedding local embed done");
        Ok(vector)
    }

    #[instrument(skip(self, texts), fields(model = %self.model_name, batch_size = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        let vectors = self.run(texts.to_vec()).await?;
        info!(count = vectors.len(), dimension = self.dimension, "step: embedding local embed_batch done");
        Ok(vectors)
    }
}
