//! Turn orchestration.

use std::sync::Arc;

use chrono::Utc;
use llm_client::GenerationClient;
use prompt::{ConversationTurn, Role};
use storage::{ConversationLogRecord, ConversationLogSink};
use tracing::{error, info, instrument, warn};

use crate::config::{AgentConfig, HistoryOnFailure};
use crate::error::{PersonaError, Result};
use crate::retriever::Retriever;
use crate::session::SessionStore;

/// Answers user turns in character, grounded in retrieved memories and session history.
pub struct PersonaAgent {
    retriever: Retriever,
    generator: Arc<dyn GenerationClient>,
    sink: Arc<dyn ConversationLogSink>,
    sessions: SessionStore,
    preamble: String,
    config: AgentConfig,
}

impl PersonaAgent {
    pub fn new(
        retriever: Retriever,
        generator: Arc<dyn GenerationClient>,
        sink: Arc<dyn ConversationLogSink>,
        preamble: impl Into<String>,
        config: AgentConfig,
    ) -> Self {
        Self {
            retriever,
            generator,
            sink,
            sessions: SessionStore::new(),
            preamble: preamble.into(),
            config,
        }
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Runs one user turn and returns the assistant reply.
    ///
    /// On success the session gains exactly the user turn and the assistant turn, and
    /// the exchange is sent to the log sink. A failed log write is reported and the
    /// reply is still returned.
    ///
    /// # Errors
    ///
    /// - [`PersonaError::EmptyInput`] for blank input; nothing changes.
    /// - [`PersonaError::Retrieval`] if the query cannot be embedded or searched;
    ///   history is untouched.
    /// - [`PersonaError::Generation`] if the model call fails; the user turn is kept
    ///   or dropped according to [`HistoryOnFailure`].
    #[instrument(skip(self, user_text), fields(text_len = user_text.len()))]
    pub async fn handle_turn(&self, session_id: &str, user_text: &str) -> Result<String> {
        if user_text.trim().is_empty() {
            return Err(PersonaError::EmptyInput);
        }

        let session = self.sessions.session(session_id).await;
        // Held for the whole turn: turns of one session never interleave.
        let mut state = session.lock().await;

        let history: Vec<ConversationTurn> =
            state.recent(self.config.max_history_turns).to_vec();
        info!(history_turns = history.len(), "step: history snapshot");

        let memories = self.retriever.retrieve(user_text, self.config.top_k).await?;
        info!(memory_count = memories.len(), "step: memories retrieved");

        let prompt = prompt::compose(&self.preamble, &memories, &history, user_text);
        info!(prompt_len = prompt.len(), "step: prompt composed");

        let reply = match self.generator.generate(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(
                    error = %e,
                    policy = self.config.history_on_failure.as_str(),
                    "step: generation failed"
                );
                if self.config.history_on_failure == HistoryOnFailure::KeepUserTurn {
                    state.append(Role::User, user_text);
                }
                return Err(PersonaError::Generation(format!("{:#}", e)));
            }
        };

        state.append(Role::User, user_text);
        state.append(Role::Assistant, reply.as_str());
        drop(state);
        info!(reply_len = reply.len(), "step: turn recorded");

        let record = ConversationLogRecord::new(session_id, Utc::now(), user_text, reply.as_str());
        if let Err(e) = self.sink.log(&record).await {
            let err = PersonaError::Logging(e.to_string());
            warn!(error = %err, "conversation log write failed, reply still returned");
        }

        Ok(reply)
    }

    /// Starts a new conversation for `session_id`.
    pub async fn reset_session(&self, session_id: &str) {
        info!(session_id, "step: session reset");
        self.sessions.reset(session_id).await;
    }

    /// The session's turns, oldest first.
    pub async fn history(&self, session_id: &str) -> Vec<ConversationTurn> {
        self.sessions.snapshot(session_id).await
    }
}
