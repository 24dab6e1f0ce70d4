use std::sync::Arc;

use sqlx::PgPool;

use crate::llm::TextGenerationBackend;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// The one resolved text-generation backend. Constructed once at
    /// startup; nothing downstream branches on which provider is active.
    pub backend: Arc<dyn TextGenerationBackend>,
    pub sessions: SessionStore,
}
