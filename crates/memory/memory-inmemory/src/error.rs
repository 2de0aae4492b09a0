use thiserror::Error;

/// Errors raised while building or querying a [`crate::FlatL2Index`].
#[derive(Error, Debug, PartialEq)]
pub enum IndexError {
    #[error("k must be at least 1, got {0}")]
    InvalidK(usize),

    #[error("Vector dimension mismatch: expected {expected}, got {actual} (at position {position})")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        position: usize,
    },

    #[error("Empty vector at position {0}")]
    EmptyVector(usize),
}
