//! OpenAI implementation of [`GenerationClient`].

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use openai_client::OpenAIClient;
use tracing::{info, instrument, warn};

use crate::{EnvLlmConfig, GenerationClient};

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// [`GenerationClient`] that sends the composed prompt as a single user message.
#[derive(Clone)]
pub struct OpenAIGenerationClient {
    client: OpenAIClient,
    model: String,
    timeout: Duration,
}

impl OpenAIGenerationClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: OpenAIClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn from_config(config: &EnvLlmConfig) -> Self {
        Self::with_base_url(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
        )
        .with_model(config.model.clone())
        .with_timeout(config.timeout)
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerationClient for OpenAIGenerationClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        info!("step: generation request");
        match tokio::time::timeout(self.timeout, self.client.complete(&self.model, prompt)).await {
            Ok(Ok(text)) => {
                info!(reply_len = text.len(), "step: generation done");
                Ok(text)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "generation request failed");
                Err(e)
            }
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "generation request timed out");
                anyhow::bail!(
                    "Generation request timed out after {} seconds",
                    self.timeout.as_secs()
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = OpenAIGenerationClient::new("sk-test".to_string());
        assert_eq!(client.model(), DEFAULT_MODEL);

        let client = client
            .with_model("gpt-4o".to_string())
            .with_timeout(Duration::from_secs(5));
        assert_eq!(client.model(), "gpt-4o");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    /// Unreachable endpoint: the failure surfaces as an error, never as empty text.
    #[tokio::test]
    async fn test_generate_unreachable_endpoint_fails() {
        let client = OpenAIGenerationClient::with_base_url(
            "sk-test".to_string(),
            "http://127.0.0.1:9/v1".to_string(),
        )
        .with_timeout(Duration::from_secs(5));
        assert!(client.generate("hello").await.is_err());
    }
}
