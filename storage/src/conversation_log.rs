//! SQLite conversation log: one row per completed turn.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::ConversationLogRecord;
use crate::sink::ConversationLogSink;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteConversationLog {
    pool_manager: SqlitePoolManager,
}

impl SqliteConversationLog {
    /// Opens (or creates) the database at `database_path` and ensures the table exists.
    pub async fn new(database_path: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_path).await?;
        let log = Self { pool_manager };
        log.init().await?;
        Ok(log)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating conversation_log table if not exist");
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS conversation_log (
                id TEXT PRIMARY KEY,
                session_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                question TEXT NOT NULL,
                answer TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_conversation_log_created_at ON conversation_log(created_at)",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Most recent `limit` records, newest first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<ConversationLogRecord>, StorageError> {
        let records = sqlx::query_as::<_, ConversationLogRecord>(
            r#"
            SELECT id, session_id, created_at, question, answer
            FROM conversation_log
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(records)
    }

    pub async fn count(&self) -> Result<i64, StorageError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM conversation_log")
            .fetch_one(self.pool_manager.pool())
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl ConversationLogSink for SqliteConversationLog {
    async fn log(&self, record: &ConversationLogRecord) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO conversation_log (id, session_id, created_at, question, answer)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.session_id)
        .bind(record.created_at)
        .bind(&record.question)
        .bind(&record.answer)
        .execute(self.pool_manager.pool())
        .await?;

        debug!(id = %record.id, session_id = %record.session_id, "Saved conversation log record");
        Ok(())
    }
}
