//! Per-session agent registry.
//!
//! Each session owns one `ConversationAgent` behind a `tokio::sync::Mutex`,
//! so at most one backend call is in flight per session while concurrent
//! sessions proceed independently. The registry itself is only locked for
//! map lookups, never across an await point.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::info;

use crate::interview::ConversationAgent;
use crate::llm::TextGenerationBackend;

type SharedAgent = Arc<tokio::sync::Mutex<ConversationAgent>>;

#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn TextGenerationBackend>,
    sessions: Arc<Mutex<HashMap<String, SharedAgent>>>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn TextGenerationBackend>) -> Self {
        Self {
            backend,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the session's agent, creating it on first interaction.
    pub fn get_or_create(&self, session_id: &str) -> SharedAgent {
        let mut sessions = self.sessions.lock().expect("session registry poisoned");
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                info!(session_id, "Creating interview session");
                Arc::new(tokio::sync::Mutex::new(ConversationAgent::new(
                    self.backend.clone(),
                )))
            })
            .clone()
    }

    /// Returns the session's agent only if it already exists.
    pub fn get(&self, session_id: &str) -> Option<SharedAgent> {
        self.sessions
            .lock()
            .expect("session registry poisoned")
            .get(session_id)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::llm::{BackendError, ChatRequest};

    struct EchoBackend;

    #[async_trait]
    impl TextGenerationBackend for EchoBackend {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, BackendError> {
            Ok(request.user_message.to_string())
        }
    }

    #[test]
    fn test_get_or_create_reuses_sessions() {
        let store = SessionStore::new(Arc::new(EchoBackend));
        let a = store.get_or_create("s1");
        let b = store.get_or_create("s1");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = SessionStore::new(Arc::new(EchoBackend));
        let a = store.get_or_create("s1");
        let b = store.get_or_create("s2");
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_get_does_not_create() {
        let store = SessionStore::new(Arc::new(EchoBackend));
        assert!(store.get("missing").is_none());
        store.get_or_create("present");
        assert!(store.get("present").is_some());
    }

    #[tokio::test]
    async fn test_histories_do_not_leak_across_sessions() {
        let store = SessionStore::new(Arc::new(EchoBackend));

        {
            let agent = store.get_or_create("s1");
            let mut agent = agent.lock().await;
            agent.respond("answer from session one", "calm").await;
        }

        let other = store.get_or_create("s2");
        assert!(other.lock().await.history().is_empty());
    }
}
