//! # Generation client abstraction
//!
//! Defines the [`GenerationClient`] trait (prompt in, text out) and an OpenAI
//! implementation. The model behind it is a black box: any non-success outcome
//! (transport error, timeout, quota, empty output) is returned as an error.

use anyhow::Result;
use async_trait::async_trait;

mod config;
mod openai_llm;

pub use config::EnvLlmConfig;
pub use openai_llm::{OpenAIGenerationClient, DEFAULT_MODEL};

/// External text-completion service.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Returns the generated reply for a fully composed prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
