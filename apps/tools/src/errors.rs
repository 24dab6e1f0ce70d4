use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::hf::HfError;

/// Tool-server error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, ToolError>`.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Inference error: {0}")]
    Inference(#[from] HfError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ToolError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ToolError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            ToolError::Inference(e) => {
                tracing::error!("Inference error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "INFERENCE_ERROR",
                    "A model inference error occurred".to_string(),
                )
            }
            ToolError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
