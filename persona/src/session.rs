//! Session registry: one independent [`ConversationState`] per session id.

use std::collections::HashMap;
use std::sync::Arc;

use prompt::ConversationTurn;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::conversation::ConversationState;

/// Maps session ids to their conversation state.
///
/// The map lock is only held to look up or insert a session; each session has its own
/// mutex, so different sessions never wait on each other.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<ConversationState>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session's state, creating an empty one on first use.
    pub async fn session(&self, session_id: &str) -> Arc<Mutex<ConversationState>> {
        if let Some(state) = self.sessions.read().await.get(session_id) {
            return Arc::clone(state);
        }
        let mut sessions = self.sessions.write().await;
        let state = sessions.entry(session_id.to_string()).or_insert_with(|| {
            debug!(session_id, "creating session");
            Arc::new(Mutex::new(ConversationState::new()))
        });
        Arc::clone(state)
    }

    /// Copy of the session's turns; empty for an unknown session.
    pub async fn snapshot(&self, session_id: &str) -> Vec<ConversationTurn> {
        let state = self.sessions.read().await.get(session_id).cloned();
        match state {
            Some(state) => state.lock().await.render().to_vec(),
            None => Vec::new(),
        }
    }

    /// Clears the session's history. Waits for an in-flight turn of that session.
    pub async fn reset(&self, session_id: &str) {
        let state = self.sessions.read().await.get(session_id).cloned();
        if let Some(state) = state {
            state.lock().await.reset();
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt::Role;

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        store.session("a").await.lock().await.append(Role::User, "from a");
        store.session("b").await.lock().await.append(Role::User, "from b");

        let a = store.snapshot("a").await;
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].content, "from a");
        assert_eq!(store.snapshot("b").await[0].content, "from b");
        assert!(store.snapshot("missing").await.is_empty());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_same_id_returns_same_state() {
        let store = SessionStore::new();
        let first = store.session("a").await;
        let second = store.session("a").await;
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_reset_clears_one_session() {
        let store = SessionStore::new();
        store.session("a").await.lock().await.append(Role::User, "hi");
        store.session("b").await.lock().await.append(Role::User, "hey");

        store.reset("a").await;
        assert!(store.snapshot("a").await.is_empty());
        assert_eq!(store.snapshot("b").await.len(), 1);
        assert_eq!(store.len().await, 2);
    }
}
