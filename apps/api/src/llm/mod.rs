//! Text-generation backend abstraction.
//!
//! ARCHITECTURAL RULE: no other module may call a model provider directly.
//! All LLM interactions go through `TextGenerationBackend`, resolved once
//! at startup from `Config` and injected as `Arc<dyn TextGenerationBackend>`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::{Config, LlmProvider};

pub mod groq;
pub mod json;
pub mod ollama;

/// One utterance in a conversation. Immutable once appended to a history.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// A single chat-completion request: system instruction, replayed prior
/// turns (oldest first), and the new user message.
#[derive(Debug)]
pub struct ChatRequest<'a> {
    pub system: &'a str,
    pub prior_turns: &'a [ConversationTurn],
    pub user_message: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Backend failure taxonomy. Every variant means "the backend was
/// unavailable for this call" at the orchestration boundary.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("call timed out after {0:?}")]
    Timeout(Duration),

    #[error("backend returned empty content")]
    Empty,
}

impl BackendError {
    /// Maps a reqwest failure, folding client-side timeouts into the
    /// explicit `Timeout` variant.
    pub(crate) fn from_request(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            BackendError::Timeout(timeout)
        } else {
            BackendError::Http(e)
        }
    }
}

/// The pluggable text-generation service. Implementations suspend until the
/// remote call resolves and fail with `BackendError` on any network, auth,
/// or quota problem.
#[async_trait]
pub trait TextGenerationBackend: Send + Sync {
    /// Backend name for logging ("ollama", "groq").
    fn name(&self) -> &str;

    async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, BackendError>;
}

/// Resolves the configured backend. Called exactly once at startup; the
/// returned handle is the only backend the process ever uses.
pub fn select_backend(config: &Config) -> Arc<dyn TextGenerationBackend> {
    let timeout = Duration::from_secs(config.llm_timeout_secs);
    match config.llm_provider {
        LlmProvider::Ollama => Arc::new(ollama::OllamaBackend::new(
            config.ollama_base_url.clone(),
            timeout,
        )),
        LlmProvider::Groq => Arc::new(groq::GroqBackend::new(
            config
                .groq_api_key
                .clone()
                .unwrap_or_default(), // presence enforced by Config::from_env
            timeout,
        )),
    }
}

/// Wire-format message shared by both providers (OpenAI-style chat roles).
#[derive(Debug, Serialize)]
pub(crate) struct WireMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Flattens a `ChatRequest` into the system/user/assistant message list
/// both providers expect: system first, prior turns oldest-first, then the
/// new user message.
pub(crate) fn build_messages<'a>(request: &'a ChatRequest<'_>) -> Vec<WireMessage<'a>> {
    let mut messages = Vec::with_capacity(request.prior_turns.len() + 2);
    messages.push(WireMessage {
        role: "system",
        content: request.system,
    });
    for turn in request.prior_turns {
        messages.push(WireMessage {
            role: turn.role.as_str(),
            content: &turn.content,
        });
    }
    messages.push(WireMessage {
        role: "user",
        content: request.user_message,
    });
    messages
}
