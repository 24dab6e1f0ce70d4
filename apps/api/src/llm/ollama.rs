//! Ollama local backend (native `/api/chat`, non-streaming).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{build_messages, BackendError, ChatRequest, TextGenerationBackend, WireMessage};

/// The model used for all local calls. Intentionally hardcoded to prevent drift.
pub const MODEL: &str = "llama3:latest";

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

pub struct OllamaBackend {
    client: Client,
    chat_url: String,
    timeout: Duration,
}

impl OllamaBackend {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            chat_url: format!("{}/api/chat", base_url.trim_end_matches('/')),
            timeout,
        }
    }
}

#[async_trait]
impl TextGenerationBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, BackendError> {
        let body = OllamaChatRequest {
            model: MODEL,
            messages: build_messages(request),
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };

        let response = self
            .client
            .post(&self.chat_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::from_request(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| BackendError::from_request(e, self.timeout))?;

        if parsed.message.content.trim().is_empty() {
            return Err(BackendError::Empty);
        }

        debug!(
            "Ollama completion succeeded ({} chars)",
            parsed.message.content.len()
        );
        Ok(parsed.message.content)
    }
}
