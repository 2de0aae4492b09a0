//! Knowledge base: the corpus chunks and their vector index, built once at startup.

use std::path::Path;

use embedding::EmbeddingService;
use memory_core::MemoryChunk;
use memory_inmemory::FlatL2Index;
use tracing::{error, info};

use crate::error::{PersonaError, Result};

/// Corpus chunks plus one embedding per chunk. Read-only after construction.
#[derive(Debug)]
pub struct KnowledgeBase {
    chunks: Vec<MemoryChunk>,
    index: FlatL2Index,
}

impl KnowledgeBase {
    /// Loads the corpus file, embeds every chunk, and builds the index.
    ///
    /// Any failure is [`PersonaError::CorpusUnavailable`]: the caller must not serve
    /// requests without a knowledge base.
    pub async fn load(path: impl AsRef<Path>, embedding: &dyn EmbeddingService) -> Result<Self> {
        let path = path.as_ref();
        let chunks = memory_loader::load_corpus(path).await.map_err(|e| {
            error!(error = %e, "step: corpus load failed");
            PersonaError::CorpusUnavailable(e.to_string())
        })?;
        Self::build(chunks, embedding).await
    }

    /// Embeds `chunks` in one batch and indexes them by chunk index.
    pub async fn build(chunks: Vec<MemoryChunk>, embedding: &dyn EmbeddingService) -> Result<Self> {
        if chunks.is_empty() {
            return Err(PersonaError::CorpusUnavailable(
                "corpus contains no memories".to_string(),
            ));
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        info!(chunk_count = texts.len(), "step: embedding corpus chunks");
        let vectors = embedding.embed_batch(&texts).await.map_err(|e| {
            error!(error = %e, "step: corpus embedding failed");
            PersonaError::CorpusUnavailable(format!("failed to embed corpus: {:#}", e))
        })?;

        if vectors.len() != chunks.len() {
            return Err(PersonaError::CorpusUnavailable(format!(
                "embedding service returned {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        let index = FlatL2Index::build(vectors).map_err(|e| {
            PersonaError::CorpusUnavailable(format!("failed to build index: {}", e))
        })?;

        info!(
            chunk_count = chunks.len(),
            dimension = index.dimension(),
            "step: knowledge base ready"
        );
        Ok(Self { chunks, index })
    }

    /// Number of memories (== number of indexed vectors).
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    pub fn chunks(&self) -> &[MemoryChunk] {
        &self.chunks
    }

    pub fn chunk(&self, index: usize) -> Option<&MemoryChunk> {
        self.chunks.get(index)
    }

    pub fn index(&self) -> &FlatL2Index {
        &self.index
    }
}
