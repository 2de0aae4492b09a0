//! Storage crate: the conversation log sink.
//!
//! Every completed turn is recorded as `(timestamp, question, answer)`. The sink is
//! best-effort from the caller's point of view; the caller decides what to do on error.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – ConversationLogRecord
//! - [`sink`] – ConversationLogSink trait and NoopLogSink
//! - [`conversation_log`] – SqliteConversationLog
//! - [`sqlite_pool`] – SqlitePoolManager

mod conversation_log;
mod error;
mod models;
mod sink;
mod sqlite_pool;

pub use conversation_log::SqliteConversationLog;
pub use error::StorageError;
pub use models::ConversationLogRecord;
pub use sink::{ConversationLogSink, NoopLogSink};
pub use sqlite_pool::SqlitePoolManager;
