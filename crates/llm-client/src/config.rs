//! LLM configuration loaded from the environment.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::openai_llm::DEFAULT_MODEL;

/// LLM config for OpenAI-compatible APIs.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl EnvLlmConfig {
    /// Load from `OPENAI_API_KEY` (required), `OPENAI_BASE_URL`, `MODEL`, `LLM_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string());
        let model = env::var("MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let timeout_secs = match env::var("LLM_TIMEOUT_SECS") {
            Ok(s) => s
                .trim()
                .parse::<u64>()
                .with_context(|| format!("LLM_TIMEOUT_SECS is not a number: {}", s))?,
            Err(_) => 60,
        };
        Ok(Self {
            openai_api_key,
            openai_base_url,
            model,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in ["OPENAI_API_KEY", "OPENAI_BASE_URL", "MODEL", "LLM_TIMEOUT_SECS"] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_load_with_defaults() {
        clear_env();
        env::set_var("OPENAI_API_KEY", "test_key");

        let config = EnvLlmConfig::from_env().unwrap();

        assert_eq!(config.openai_api_key, "test_key");
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(60));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_api_key() {
        clear_env();
        assert!(EnvLlmConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_invalid_timeout() {
        clear_env();
        env::set_var("OPENAI_API_KEY", "test_key");
        env::set_var("LLM_TIMEOUT_SECS", "soon");
        assert!(EnvLlmConfig::from_env().is_err());

        env::set_var("LLM_TIMEOUT_SECS", "15");
        env::set_var("MODEL", "gpt-4o");
        let config = EnvLlmConfig::from_env().unwrap();
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.model, "gpt-4o");
        clear_env();
    }
}
