//! Agent configuration loaded from the environment.

use std::env;

use anyhow::{bail, Context, Result};

use crate::retriever::DEFAULT_TOP_K;

/// What happens to the user's turn when generation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryOnFailure {
    /// Record the user turn without an assistant turn.
    #[default]
    KeepUserTurn,
    /// Leave the history exactly as it was before the turn.
    Discard,
}

impl HistoryOnFailure {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "keep_user_turn" | "keep" => Ok(Self::KeepUserTurn),
            "discard" => Ok(Self::Discard),
            other => bail!(
                "Unknown history-on-failure policy: {} (expected keep_user_turn or discard)",
                other
            ),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeepUserTurn => "keep_user_turn",
            Self::Discard => "discard",
        }
    }
}

/// Per-turn behavior of [`crate::PersonaAgent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Memories retrieved per turn. Always >= 1.
    pub top_k: usize,
    /// Only the last N turns go into the prompt; `None` sends the full history.
    pub max_history_turns: Option<usize>,
    pub history_on_failure: HistoryOnFailure,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_history_turns: None,
            history_on_failure: HistoryOnFailure::default(),
        }
    }
}

impl AgentConfig {
    /// Load from `RETRIEVAL_TOP_K`, `MAX_HISTORY_TURNS`, `HISTORY_ON_FAILURE`.
    pub fn from_env() -> Result<Self> {
        let top_k = match non_empty_var("RETRIEVAL_TOP_K") {
            Some(s) => s
                .trim()
                .parse::<usize>()
                .with_context(|| format!("RETRIEVAL_TOP_K is not a number: {}", s))?,
            None => DEFAULT_TOP_K,
        };
        let max_history_turns = match non_empty_var("MAX_HISTORY_TURNS") {
            Some(s) => Some(
                s.trim()
                    .parse::<usize>()
                    .with_context(|| format!("MAX_HISTORY_TURNS is not a number: {}", s))?,
            ),
            None => None,
        };
        let history_on_failure = match non_empty_var("HISTORY_ON_FAILURE") {
            Some(s) => HistoryOnFailure::parse(&s)?,
            None => HistoryOnFailure::default(),
        };

        let config = Self {
            top_k,
            max_history_turns,
            history_on_failure,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            bail!("RETRIEVAL_TOP_K must be at least 1");
        }
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}
