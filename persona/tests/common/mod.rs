//! Test doubles shared by the persona integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use embedding::EmbeddingService;
use llm_client::GenerationClient;
use persona::{AgentConfig, KnowledgeBase, PersonaAgent, Retriever};
use storage::{ConversationLogRecord, ConversationLogSink, StorageError};

/// Keyword groups; one vector axis per group. A text's coordinate on an axis is the
/// number of its words that belong to the group.
const KEYWORD_GROUPS: &[&[&str]] = &[
    &["chess", "board", "game", "play", "played"],
    &["delhi", "grew", "from", "where", "city", "hometown"],
    &["loyalty", "loyal", "friend", "friends", "trust"],
    &["music", "song", "sing", "guitar"],
];

pub const CORPUS: &str = "I love chess.\n\nI grew up in Delhi.\n\nI value loyalty.";

/// Deterministic bag-of-keywords embedding.
#[derive(Default)]
pub struct KeywordEmbedding {
    pub query_calls: AtomicUsize,
}

pub fn keyword_vector(text: &str) -> Vec<f32> {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect();
    KEYWORD_GROUPS
        .iter()
        .map(|group| words.iter().filter(|w| group.contains(&w.as_str())).count() as f32)
        .collect()
}

#[async_trait]
impl EmbeddingService for KeywordEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        Ok(keyword_vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| keyword_vector(t)).collect())
    }
}

/// Embeds the corpus fine, fails every single-text (query) call.
pub struct QueryFailingEmbedding;

#[async_trait]
impl EmbeddingService for QueryFailingEmbedding {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(anyhow!("embedding backend unreachable"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| keyword_vector(t)).collect())
    }
}

/// Fails everything.
pub struct BrokenEmbedding;

#[async_trait]
impl EmbeddingService for BrokenEmbedding {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(anyhow!("model not loaded"))
    }

    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(anyhow!("model not loaded"))
    }
}

/// Replies "reply N" (1-based) and records every prompt. Fails when `fail` is set.
#[derive(Default)]
pub struct ScriptedGenerator {
    pub prompts: Mutex<Vec<String>>,
    pub fail: std::sync::atomic::AtomicBool,
}

impl ScriptedGenerator {
    pub fn failing() -> Self {
        let generator = Self::default();
        generator.set_failing(true);
        generator
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl GenerationClient for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("upstream returned 503"));
        }
        Ok(format!("reply {}", prompts.len()))
    }
}

/// Keeps every record in memory.
#[derive(Default)]
pub struct RecordingSink {
    pub records: Mutex<Vec<ConversationLogRecord>>,
}

impl RecordingSink {
    pub fn records(&self) -> Vec<ConversationLogRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConversationLogSink for RecordingSink {
    async fn log(&self, record: &ConversationLogRecord) -> std::result::Result<(), StorageError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Rejects every record.
pub struct FailingSink;

#[async_trait]
impl ConversationLogSink for FailingSink {
    async fn log(&self, _record: &ConversationLogRecord) -> std::result::Result<(), StorageError> {
        Err(StorageError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "log destination is read-only",
        )))
    }
}

pub async fn knowledge_base(corpus: &str, embedding: &dyn EmbeddingService) -> KnowledgeBase {
    KnowledgeBase::build(memory_loader::split_corpus(corpus), embedding)
        .await
        .unwrap()
}

pub struct Harness {
    pub agent: PersonaAgent,
    pub generator: Arc<ScriptedGenerator>,
    pub sink: Arc<RecordingSink>,
}

pub async fn harness(config: AgentConfig) -> Harness {
    harness_with(config, Arc::new(ScriptedGenerator::default())).await
}

pub async fn harness_with(config: AgentConfig, generator: Arc<ScriptedGenerator>) -> Harness {
    let embedding = Arc::new(KeywordEmbedding::default());
    let knowledge = Arc::new(knowledge_base(CORPUS, embedding.as_ref()).await);
    let retriever = Retriever::new(knowledge, embedding);
    let sink = Arc::new(RecordingSink::default());
    let agent = PersonaAgent::new(
        retriever,
        generator.clone(),
        sink.clone(),
        "You are Ananya.",
        config,
    );
    Harness {
        agent,
        generator,
        sink,
    }
}
