//! Builds the embedding service, generation client and log sink from config.

use std::sync::Arc;

use anyhow::{Context, Result};
use embedding::{EmbeddingProvider, EmbeddingService, EnvEmbeddingConfig};
use fastembed_embedding::FastEmbedService;
use llm_client::{EnvLlmConfig, GenerationClient, OpenAIGenerationClient};
use openai_client::mask_token;
use openai_embedding::OpenAIEmbedding;
use storage::{ConversationLogSink, NoopLogSink, SqliteConversationLog};
use tracing::info;

use crate::config::AppConfig;

/// Creates the embedding service selected by `EMBEDDING_PROVIDER`.
///
/// The local model is loaded on the blocking pool; the first run may download it.
pub async fn create_embedding_service(
    config: &EnvEmbeddingConfig,
) -> Result<Arc<dyn EmbeddingService>> {
    config.validate()?;
    match config.provider {
        EmbeddingProvider::FastEmbed => {
            let model = config.model.clone();
            let cache_dir = config.cache_dir.clone();
            let service = tokio::task::spawn_blocking(move || {
                FastEmbedService::new(model.as_deref(), cache_dir.as_deref())
            })
            .await
            .context("Embedding model loader task panicked")??;
            info!(
                provider = config.provider.as_str(),
                model = service.model_name(),
                dimension = service.dimension(),
                "step: embedding service ready"
            );
            Ok(Arc::new(service))
        }
        EmbeddingProvider::OpenAI => {
            let model = config
                .model
                .clone()
                .unwrap_or_else(|| openai_embedding::DEFAULT_MODEL.to_string());
            info!(
                provider = config.provider.as_str(),
                model = %model,
                api_key = %mask_token(&config.openai_api_key),
                "step: embedding service ready"
            );
            Ok(Arc::new(OpenAIEmbedding::new_with_base_url(
                config.openai_api_key.clone(),
                model,
                config.openai_base_url.as_deref(),
            )))
        }
    }
}

/// Creates the OpenAI-compatible generation client.
pub fn create_generation_client(config: &EnvLlmConfig) -> Arc<dyn GenerationClient> {
    info!(
        model = %config.model,
        base_url = %config.openai_base_url,
        api_key = %mask_token(&config.openai_api_key),
        timeout_secs = config.timeout.as_secs(),
        "step: generation client ready"
    );
    Arc::new(OpenAIGenerationClient::from_config(config))
}

/// SQLite conversation log, or a no-op sink when logging is disabled.
pub async fn create_log_sink(config: &AppConfig) -> Result<Arc<dyn ConversationLogSink>> {
    if !config.log_conversations {
        info!("step: conversation log disabled");
        return Ok(Arc::new(NoopLogSink));
    }
    let log = SqliteConversationLog::new(&config.database_url)
        .await
        .with_context(|| format!("Open conversation log at {}", config.database_url))?;
    info!(path = %config.database_url, "step: conversation log ready");
    Ok(Arc::new(log))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn app_config(database_url: String, log_conversations: bool) -> AppConfig {
        AppConfig {
            corpus_path: PathBuf::from("Character_Bible.txt"),
            preamble_file: None,
            database_url,
            log_file: "logs/persona.log".to_string(),
            log_conversations,
        }
    }

    #[tokio::test]
    async fn test_openai_embedding_requires_key() {
        let config = EnvEmbeddingConfig {
            provider: EmbeddingProvider::OpenAI,
            model: None,
            cache_dir: None,
            openai_api_key: String::new(),
            openai_base_url: None,
        };
        assert!(create_embedding_service(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_openai_embedding_builds_offline() {
        let config = EnvEmbeddingConfig {
            provider: EmbeddingProvider::OpenAI,
            model: Some("text-embedding-3-small".to_string()),
            cache_dir: None,
            openai_api_key: "sk-test-1234567890".to_string(),
            openai_base_url: Some("http://127.0.0.1:9/v1".to_string()),
        };
        assert!(create_embedding_service(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_sqlite_sink_created_in_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("conversations.db");
        let config = app_config(path.to_string_lossy().to_string(), true);
        assert!(create_log_sink(&config).await.is_ok());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_disabled_log_uses_noop_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversations.db");
        let config = app_config(path.to_string_lossy().to_string(), false);
        assert!(create_log_sink(&config).await.is_ok());
        assert!(!path.exists());
    }
}
