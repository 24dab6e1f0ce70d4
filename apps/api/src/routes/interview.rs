use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::AppError;
use crate::interview::report::ReportOutcome;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    pub session_id: String,
    pub transcript: String,
    pub emotion_label: String,
    // Reported by the client-side emotion detector; not yet used for
    // prompt conditioning (only the label is).
    #[allow(dead_code)]
    pub emotion_score: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct AiResponse {
    pub text: String,
    pub audio_base64: Option<String>,
    pub emotion_context: String,
    pub next_round_trigger: bool,
}

/// POST /api/interact
/// Main loop: candidate input + emotion -> next assistant utterance.
/// Backend failures never surface here; the agent substitutes its fallback.
pub async fn handle_interact(
    State(state): State<AppState>,
    Json(req): Json<InteractionRequest>,
) -> Result<Json<AiResponse>, AppError> {
    if req.session_id.trim().is_empty() {
        return Err(AppError::Validation("session_id must not be empty".to_string()));
    }
    if req.transcript.trim().is_empty() {
        return Err(AppError::Validation("transcript must not be empty".to_string()));
    }

    let agent = state.sessions.get_or_create(&req.session_id);
    let mut agent = agent.lock().await;
    let text = agent.respond(&req.transcript, &req.emotion_label).await;

    Ok(Json(AiResponse {
        text,
        audio_base64: None,
        emotion_context: "neutral".to_string(),
        next_round_trigger: false,
    }))
}

/// POST /api/report/:session_id
/// Summarizes the session's history into an assessment report.
pub async fn handle_report(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let agent = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session '{session_id}' not found")))?;

    let agent = agent.lock().await;
    let report: ReportOutcome = agent.report().await;

    Ok(Json(json!({ "report": report })))
}
