//! Blank-line corpus splitting.

use memory_core::MemoryChunk;

/// Chunk separator: two consecutive newlines. Longer runs split into extra segments
/// that are empty after trimming.
const SEPARATOR: &str = "\n\n";

/// Splits corpus text into chunks.
///
/// Only two or more consecutive newlines separate chunks; a line holding spaces or tabs
/// is part of the surrounding chunk. `\r\n` is normalised to `\n` first. Each segment
/// is trimmed and empty segments are discarded without consuming an index, so indices
/// are always `0..chunks.len()`.
pub fn split_corpus(text: &str) -> Vec<MemoryChunk> {
    let text = text.replace("\r\n", "\n");
    let mut chunks = Vec::new();

    for segment in text.split(SEPARATOR) {
        let trimmed = segment.trim();
        if !trimmed.is_empty() {
            chunks.push(MemoryChunk::new(chunks.len(), trimmed));
        }
    }

    chunks
}
