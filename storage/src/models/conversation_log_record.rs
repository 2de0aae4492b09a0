//! One logged question/answer exchange.
//!
//! Maps to the `conversation_log` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ConversationLogRecord {
    pub id: String,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub question: String,
    pub answer: String,
}

impl ConversationLogRecord {
    /// Creates a record with a generated UUID and the given timestamp.
    pub fn new(
        session_id: impl Into<String>,
        created_at: DateTime<Utc>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            created_at,
            question: question.into(),
            answer: answer.into(),
        }
    }
}
