use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A candidate record created at resume upload. `resume_hash` is the hex
/// SHA-256 of the raw uploaded bytes and acts as a content-addressed
/// dedup key: identical files always hash identically regardless of the
/// metadata submitted with them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub domain: String,
    pub resume_text: String,
    pub resume_hash: String,
    pub created_at: DateTime<Utc>,
}
