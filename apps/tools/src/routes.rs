use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::ToolError;
use crate::hf::HfClient;
use crate::tools::{proficiency_scorer, resume_parser, skill_matcher};

#[derive(Clone)]
pub struct ToolState {
    pub hf: HfClient,
}

pub fn build_router(state: ToolState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/tools/parse_resume", post(handle_parse_resume))
        .route("/tools/match_skills", post(handle_match_skills))
        .route("/tools/assess_proficiency", post(handle_assess_proficiency))
        .with_state(state)
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "online",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "interviewer-tools"
    }))
}

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    pub file_content: String,
}

/// POST /tools/parse_resume
/// Extracts skills, companies, and locations from resume text.
async fn handle_parse_resume(
    State(state): State<ToolState>,
    Json(req): Json<ParseResumeRequest>,
) -> Result<Json<resume_parser::ParsedResume>, ToolError> {
    if req.file_content.trim().is_empty() {
        return Err(ToolError::Validation(
            "file_content must not be empty".to_string(),
        ));
    }
    let parsed = resume_parser::parse(&state.hf, &req.file_content).await?;
    Ok(Json(parsed))
}

#[derive(Debug, Deserialize)]
pub struct MatchSkillsRequest {
    pub candidate_text: String,
    pub job_description: String,
}

/// POST /tools/match_skills
/// Match percentage and feedback between candidate and job description.
async fn handle_match_skills(
    State(state): State<ToolState>,
    Json(req): Json<MatchSkillsRequest>,
) -> Result<Json<skill_matcher::MatchResult>, ToolError> {
    if req.candidate_text.trim().is_empty() || req.job_description.trim().is_empty() {
        return Err(ToolError::Validation(
            "candidate_text and job_description must not be empty".to_string(),
        ));
    }
    let result = skill_matcher::match_skills(&state.hf, &req.candidate_text, &req.job_description)
        .await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct AssessProficiencyRequest {
    pub text: String,
    #[serde(default = "default_domain")]
    pub domain: String,
}

fn default_domain() -> String {
    "general".to_string()
}

/// POST /tools/assess_proficiency
/// Proficiency level (language or technical) from text.
async fn handle_assess_proficiency(
    State(state): State<ToolState>,
    Json(req): Json<AssessProficiencyRequest>,
) -> Result<Json<proficiency_scorer::ProficiencyResult>, ToolError> {
    if req.text.trim().is_empty() {
        return Err(ToolError::Validation("text must not be empty".to_string()));
    }
    let result = proficiency_scorer::assess(&state.hf, &req.text, &req.domain).await?;
    Ok(Json(result))
}
