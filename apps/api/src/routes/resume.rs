use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub candidate_id: Uuid,
    pub resume_hash: String,
    pub message: String,
}

/// POST /api/upload-resume
/// Multipart upload: role, domain, optional name/email, and the resume file.
/// The stored `resume_hash` is the hex SHA-256 of the raw file bytes.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let mut role: Option<String> = None;
    let mut domain: Option<String> = None;
    let mut name: Option<String> = None;
    let mut email: Option<String> = None;
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "role" => role = Some(read_text_field(field).await?),
            "domain" => domain = Some(read_text_field(field).await?),
            "name" => name = Some(read_text_field(field).await?),
            "email" => email = Some(read_text_field(field).await?),
            "file" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file field: {e}")))?;
                file_bytes = Some(bytes.to_vec());
            }
            _ => {} // unknown fields are ignored
        }
    }

    let role = role.ok_or_else(|| AppError::Validation("Missing 'role' field".to_string()))?;
    let domain = domain.ok_or_else(|| AppError::Validation("Missing 'domain' field".to_string()))?;
    let file_bytes =
        file_bytes.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    let resume_hash = content_hash(&file_bytes);
    let resume_text = String::from_utf8_lossy(&file_bytes).into_owned();

    // Content-addressed dedup: the same file bytes map to the same hash no
    // matter what metadata accompanies them, so a repeat upload returns the
    // existing candidate instead of inserting a duplicate.
    let existing: Option<CandidateRow> =
        sqlx::query_as("SELECT * FROM candidates WHERE resume_hash = $1 LIMIT 1")
            .bind(&resume_hash)
            .fetch_optional(&state.db)
            .await?;

    if let Some(candidate) = existing {
        tracing::info!(candidate_id = %candidate.id, resume_hash = %resume_hash, "Duplicate resume upload");
        return Ok(Json(ResumeUploadResponse {
            candidate_id: candidate.id,
            resume_hash,
            message: "Resume already on file".to_string(),
        }));
    }

    let candidate_id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO candidates (id, name, email, role, domain, resume_text, resume_hash, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(candidate_id)
    .bind(&name)
    .bind(&email)
    .bind(&role)
    .bind(&domain)
    .bind(&resume_text)
    .bind(&resume_hash)
    .bind(Utc::now())
    .execute(&state.db)
    .await?;

    tracing::info!(%candidate_id, resume_hash = %resume_hash, "Resume uploaded");

    Ok(Json(ResumeUploadResponse {
        candidate_id,
        resume_hash,
        message: "Resume uploaded successfully".to_string(),
    }))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read form field: {e}")))
}

/// Hex SHA-256 of the raw bytes — the content-addressed dedup key.
pub fn content_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_bytes_hash_identically() {
        let bytes = b"Jane Doe\nRust, PostgreSQL, distributed systems";
        assert_eq!(content_hash(bytes), content_hash(bytes));
    }

    #[test]
    fn test_different_bytes_hash_differently() {
        assert_ne!(content_hash(b"resume a"), content_hash(b"resume b"));
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = content_hash(b"");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
