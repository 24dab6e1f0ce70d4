use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::quiz::{QuizGenerator, QuizQuestion};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub domain: String,
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

/// POST /api/generate-quiz
/// Generates exactly 10 quiz questions based on resume and domain.
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    Json(req): Json<QuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    if req.domain.trim().is_empty() {
        return Err(AppError::Validation("domain must not be empty".to_string()));
    }
    if req.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text must not be empty".to_string()));
    }

    let generator = QuizGenerator::new(state.backend.clone());
    let questions = generator.generate(&req.resume_text, &req.domain).await?;

    Ok(Json(QuizResponse { questions }))
}
