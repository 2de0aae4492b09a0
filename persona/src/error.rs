//! Error types for the persona core.
//!
//! [`PersonaError::CorpusUnavailable`] is fatal at startup; the other variants abort a
//! single turn. Logging failures are reported, never returned from a turn.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersonaError {
    /// Corpus missing/unreadable/empty, or embedding/index construction failed.
    #[error("Corpus unavailable: {0}")]
    CorpusUnavailable(String),

    /// Query embedding or index search failed.
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// The generation client failed or timed out.
    #[error("Generation error: {0}")]
    Generation(String),

    /// The conversation log sink rejected a record.
    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Empty input")]
    EmptyInput,
}

/// Result type for persona operations; uses [`PersonaError`].
pub type Result<T> = std::result::Result<T, PersonaError>;
