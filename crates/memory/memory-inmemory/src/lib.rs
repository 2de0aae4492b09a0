//! # In-Memory Vector Index
//!
//! [`FlatL2Index`] stores one embedding per memory chunk in a contiguous buffer and answers
//! exact k-nearest-neighbor queries by brute force.
//!
//! **Advantages**:
//! - Exact results, deterministic ordering
//! - No I/O, no external service
//! - Read-only after build, so it can be shared across threads without locking
//!
//! **Limitations**:
//! - O(n·d) per query; intended for persona-sized corpora (thousands of chunks)
//! - Built once; no incremental insert
//!
//! ## Example
//!
//! ```rust
//! use memory_inmemory::FlatL2Index;
//!
//! let index = FlatL2Index::build(vec![vec![0.0, 0.0], vec![1.0, 1.0]]).unwrap();
//! let hits = index.search(&[0.9, 0.9], 1).unwrap();
//! assert_eq!(hits[0].chunk_index, 1);
//! ```

mod error;
mod flat_index;

pub use error::IndexError;
pub use flat_index::{squared_l2, FlatL2Index};
