//! # Persona
//!
//! Retrieval-augmented conversational core. One user turn runs:
//!
//! 1. snapshot the session history ([`ConversationState`]),
//! 2. embed the query and fetch the top-k memories ([`Retriever`] over a [`KnowledgeBase`]),
//! 3. compose the grounded prompt ([`prompt::compose`]),
//! 4. call the generation client,
//! 5. append the turn to the session and log it to the sink (best-effort).
//!
//! [`PersonaAgent::handle_turn`] is the entry point. The knowledge base and embedding
//! service are built once at startup and shared read-only; each session's history is
//! behind its own async mutex so turns within a session are serialised.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy
//! - [`knowledge`] - Startup build: corpus → embeddings → index
//! - [`retriever`] - Query embedding + k-NN lookup
//! - [`conversation`] - Per-session turn log
//! - [`session`] - Session registry
//! - [`config`] - Agent configuration
//! - [`agent`] - Turn orchestration

pub mod agent;
pub mod config;
pub mod conversation;
pub mod error;
pub mod knowledge;
pub mod retriever;
pub mod session;

pub use agent::PersonaAgent;
pub use config::{AgentConfig, HistoryOnFailure};
pub use conversation::ConversationState;
pub use error::{PersonaError, Result};
pub use knowledge::KnowledgeBase;
pub use retriever::Retriever;
pub use session::SessionStore;
