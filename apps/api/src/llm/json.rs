//! Extraction of a JSON payload from possibly-fenced model output.
//!
//! Models asked for strict JSON still wrap it in ```json fences often
//! enough that every structured-output path runs through this first.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JsonPayloadError {
    #[error("output does not contain a JSON payload")]
    NotJson,
}

/// Strips ```json ... ``` or ``` ... ``` code fences, trims, and returns
/// the remainder iff it looks like a JSON object or array. Callers still
/// run the result through serde; this only isolates the fragile
/// fence-stripping step from parsing proper.
pub fn extract_json_payload(text: &str) -> Result<&str, JsonPayloadError> {
    let payload = strip_json_fences(text);
    if payload.starts_with('{') || payload.starts_with('[') {
        Ok(payload)
    } else {
        Err(JsonPayloadError::NotJson)
    }
}

fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
