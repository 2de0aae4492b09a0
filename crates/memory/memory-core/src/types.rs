//! # Core Types
//!
//! ## MemoryChunk
//!
//! A discrete memory taken from the corpus. `index` is assigned in corpus order to
//! surviving (non-empty) segments only and is the join key into the vector index.
//!
//! ## Neighbor
//!
//! A k-NN hit: which chunk, and how far from the query (squared Euclidean).

use serde::{Deserialize, Serialize};

/// An immutable unit of long-term knowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryChunk {
    /// Position in the loaded corpus; stable for the process lifetime.
    pub index: usize,
    /// Trimmed, non-empty text.
    pub text: String,
}

impl MemoryChunk {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// A single search result from a vector index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub chunk_index: usize,
    /// Squared Euclidean distance to the query vector.
    pub distance: f32,
}

/// A retrieved chunk together with its distance to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: MemoryChunk,
    pub distance: f32,
}
