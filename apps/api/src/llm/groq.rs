//! Groq hosted backend (OpenAI-compatible chat completions).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{build_messages, BackendError, ChatRequest, TextGenerationBackend, WireMessage};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for all Groq calls. Intentionally hardcoded to prevent drift.
pub const MODEL: &str = "llama-3.3-70b-versatile";

#[derive(Debug, Serialize)]
struct GroqChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GroqChatResponse {
    choices: Vec<GroqChoice>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqMessage,
}

#[derive(Debug, Deserialize)]
struct GroqMessage {
    content: Option<String>,
}

pub struct GroqBackend {
    client: Client,
    api_key: String,
    timeout: Duration,
}

impl GroqBackend {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            timeout,
        }
    }
}

#[async_trait]
impl TextGenerationBackend for GroqBackend {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, BackendError> {
        let body = GroqChatRequest {
            model: MODEL,
            messages: build_messages(request),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
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

        let parsed: GroqChatResponse = response
            .json()
            .await
            .map_err(|e| BackendError::from_request(e, self.timeout))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|t| !t.trim().is_empty())
            .ok_or(BackendError::Empty)?;

        debug!("Groq completion succeeded ({} chars)", text.len());
        Ok(text)
    }
}
