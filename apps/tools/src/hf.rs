//! Hugging Face Inference API client — the single point of entry for all
//! remote model calls in the tool server.
//!
//! Three pipelines are used: token classification (NER), feature
//! extraction (sentence embeddings), and zero-shot classification. Every
//! request sets `wait_for_model` so cold models load instead of 503ing.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

pub const NER_MODEL: &str = "dslim/bert-base-NER";
pub const EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
pub const ZERO_SHOT_MODEL: &str = "facebook/bart-large-mnli";

#[derive(Debug, Error)]
pub enum HfError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("call timed out after {0:?}")]
    Timeout(Duration),

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

/// A single aggregated NER entity as returned by the token-classification
/// pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NerEntity {
    pub entity_group: String,
    pub word: String,
    pub score: f64,
    pub start: usize,
    pub end: usize,
}

/// Zero-shot classification result: labels sorted by descending score.
#[derive(Debug, Clone, Deserialize)]
pub struct ZeroShotResult {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

#[derive(Clone)]
pub struct HfClient {
    client: Client,
    api_base: String,
    token: String,
    timeout: Duration,
}

impl HfClient {
    pub fn new(api_base: String, token: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
            timeout,
        }
    }

    /// Named-entity extraction with simple aggregation.
    pub async fn ner(&self, text: &str) -> Result<Vec<NerEntity>, HfError> {
        let body = json!({
            "inputs": text,
            "parameters": { "aggregation_strategy": "simple" },
            "options": { "wait_for_model": true }
        });
        let entities: Vec<NerEntity> = self.post(NER_MODEL, &body).await?;
        debug!("NER returned {} entities", entities.len());
        Ok(entities)
    }

    /// Sentence embeddings for a batch of texts, one vector per input.
    pub async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, HfError> {
        let body = json!({
            "inputs": texts,
            "options": { "wait_for_model": true }
        });
        let vectors: Vec<Vec<f32>> = self.post(EMBEDDING_MODEL, &body).await?;
        if vectors.len() != texts.len() {
            return Err(HfError::Shape(format!(
                "expected {} embedding vectors, got {}",
                texts.len(),
                vectors.len()
            )));
        }
        Ok(vectors)
    }

    /// Zero-shot classification of `text` against `candidate_labels`.
    pub async fn zero_shot(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<ZeroShotResult, HfError> {
        let body = json!({
            "inputs": text,
            "parameters": { "candidate_labels": candidate_labels },
            "options": { "wait_for_model": true }
        });
        let result: ZeroShotResult = self.post(ZERO_SHOT_MODEL, &body).await?;
        if result.labels.len() != result.scores.len() || result.labels.is_empty() {
            return Err(HfError::Shape(
                "zero-shot labels/scores mismatch".to_string(),
            ));
        }
        Ok(result)
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        model: &str,
        body: &serde_json::Value,
    ) -> Result<T, HfError> {
        let url = format!("{}/models/{model}", self.api_base);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HfError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|e| self.map_request_error(e))
    }

    fn map_request_error(&self, e: reqwest::Error) -> HfError {
        if e.is_timeout() {
            HfError::Timeout(self.timeout)
        } else {
            HfError::Http(e)
        }
    }
}
