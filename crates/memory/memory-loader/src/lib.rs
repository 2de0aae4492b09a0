//! # Memory Loader
//!
//! Reads the persona corpus (UTF-8 text, memories separated by blank lines) into an
//! ordered list of [`MemoryChunk`].
//!
//! A missing or unreadable file is a [`LoadError`]; callers treat it as fatal at startup.

mod error;
mod splitter;


pub use error::LoadError;
pub use splitter::split_corpus;

use std::path::Path;

use memory_core::MemoryChunk;
use tracing::info;

/// Loads and splits the corpus file at `path`.
///
/// # Flow
///
/// 1. Read the whole file as UTF-8.
/// 2. Split on blank lines, trim, drop empty segments ([`split_corpus`]).
/// 3. Return the surviving chunks, indexed `0..n` in file order.
pub async fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<MemoryChunk>, LoadError> {
    let path = path.as_ref();
    info!(path = %path.display(), "step: corpus read");

    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let chunks = split_corpus(&text);
    info!(
        path = %path.display(),
        bytes = text.len(),
        chunk_count = chunks.len(),
        "step: corpus split done"
    );
    Ok(chunks)
}
