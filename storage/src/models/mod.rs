mod conversation_log_record;

pub use conversation_log_record::ConversationLogRecord;
