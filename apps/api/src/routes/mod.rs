pub mod health;
pub mod interview;
pub mod quiz;
pub mod resume;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview loop
        .route("/api/interact", post(interview::handle_interact))
        .route("/api/report/:session_id", post(interview::handle_report))
        // Quiz round
        .route("/api/generate-quiz", post(quiz::handle_generate_quiz))
        // Candidate intake
        .route("/api/upload-resume", post(resume::handle_upload_resume))
        .with_state(state)
}
