//! # Memory Core
//!
//! Shared types for the long-term memory corpus.
//!
//! - [`MemoryChunk`]: one immutable unit of corpus text with its build-time index.
//! - [`Neighbor`]: one search hit from a vector index (chunk index + squared distance).
//! - [`ScoredChunk`]: a neighbor joined back to its chunk.

mod types;

pub use types::{MemoryChunk, Neighbor, ScoredChunk};
