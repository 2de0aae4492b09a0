//! Embedding configuration loaded from the environment.

use anyhow::Result;
use std::env;

/// Embedding backend. Matches `EMBEDDING_PROVIDER`: `fastembed` | `openai`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProvider {
    /// Local ONNX sentence-embedding model.
    FastEmbed,
    /// OpenAI-compatible embeddings API.
    OpenAI,
}

impl EmbeddingProvider {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "fastembed" | "local" => Ok(Self::FastEmbed),
            "openai" => Ok(Self::OpenAI),
            other => anyhow::bail!(
                "Unknown EMBEDDING_PROVIDER '{}': expected fastembed or openai",
                other
            ),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FastEmbed => "fastembed",
            Self::OpenAI => "openai",
        }
    }
}

/// Embedding config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvEmbeddingConfig {
    pub provider: EmbeddingProvider,
    /// Model name; None = provider default.
    pub model: Option<String>,
    /// Where the local model files are cached (fastembed only).
    pub cache_dir: Option<String>,
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
}

impl EnvEmbeddingConfig {
    /// Load from `EMBEDDING_PROVIDER`, `EMBEDDING_MODEL`, `EMBEDDING_CACHE_DIR`,
    /// `OPENAI_API_KEY`, `OPENAI_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let provider = EmbeddingProvider::parse(
            &env::var("EMBEDDING_PROVIDER").unwrap_or_default(),
        )?;
        let model = non_empty_var("EMBEDDING_MODEL");
        let cache_dir = non_empty_var("EMBEDDING_CACHE_DIR");
        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let openai_base_url = non_empty_var("OPENAI_BASE_URL");
        Ok(Self {
            provider,
            model,
            cache_dir,
            openai_api_key,
            openai_base_url,
        })
    }

    /// Validate config (openai requires OPENAI_API_KEY).
    pub fn validate(&self) -> Result<()> {
        if self.provider == EmbeddingProvider::OpenAI && self.openai_api_key.is_empty() {
            anyhow::bail!("EMBEDDING_PROVIDER=openai requires OPENAI_API_KEY to be set");
        }
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}
