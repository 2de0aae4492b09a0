//! Log sink interface.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::ConversationLogRecord;

/// Append-only destination for completed turns.
#[async_trait]
pub trait ConversationLogSink: Send + Sync {
    async fn log(&self, record: &ConversationLogRecord) -> Result<(), StorageError>;
}

/// Sink that drops every record. Used when logging is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogSink;

#[async_trait]
impl ConversationLogSink for NoopLogSink {
    async fn log(&self, _record: &ConversationLogRecord) -> Result<(), StorageError> {
        Ok(())
    }
}
