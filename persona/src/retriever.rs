//! Retriever: embeds the query and fetches the nearest memories.

use std::sync::Arc;

use embedding::EmbeddingService;
use memory_core::ScoredChunk;
use tracing::{debug, info, warn};

use crate::error::{PersonaError, Result};
use crate::knowledge::KnowledgeBase;

/// Default number of memories per query.
pub const DEFAULT_TOP_K: usize = 5;

/// Query-time side of the pipeline. Shares the knowledge base and embedding service
/// read-only, so one instance serves every session concurrently.
#[derive(Clone)]
pub struct Retriever {
    knowledge: Arc<KnowledgeBase>,
    embedding: Arc<dyn EmbeddingService>,
}

impl Retriever {
    pub fn new(knowledge: Arc<KnowledgeBase>, embedding: Arc<dyn EmbeddingService>) -> Self {
        Self {
            knowledge,
            embedding,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Returns up to `k` chunk texts, closest first.
    ///
    /// Fewer than `k` chunks in the corpus is not an error: all of them are returned.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>> {
        Ok(self
            .retrieve_scored(query, k)
            .await?
            .into_iter()
            .map(|scored| scored.chunk.text)
            .collect())
    }

    /// Like [`Retriever::retrieve`], keeping the chunk and its squared distance.
    pub async fn retrieve_scored(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        info!(query_len = query.len(), k, "step: embedding generate query vector");
        let query_vector = self.embedding.embed(query).await.map_err(|e| {
            warn!(error = %e, "query embedding failed");
            PersonaError::Retrieval(format!("failed to embed query: {:#}", e))
        })?;

        let neighbors = self
            .knowledge
            .index()
            .search(&query_vector, k)
            .map_err(|e| PersonaError::Retrieval(e.to_string()))?;

        let scored = neighbors
            .into_iter()
            .map(|n| {
                let chunk = self.knowledge.chunk(n.chunk_index).ok_or_else(|| {
                    PersonaError::Retrieval(format!("index returned unknown chunk {}", n.chunk_index))
                })?;
                Ok(ScoredChunk {
                    chunk: chunk.clone(),
                    distance: n.distance,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for (rank, s) in scored.iter().enumerate() {
            debug!(rank, chunk_index = s.chunk.index, distance = s.distance, "retrieved memory");
        }
        info!(count = scored.len(), "step: retrieval done");
        Ok(scored)
    }
}
