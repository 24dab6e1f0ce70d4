//! Semantic skill matching: cosine similarity between candidate and job
//! embeddings, scaled to a percentage and mapped to a feedback band.

use serde::Serialize;

use crate::errors::ToolError;
use crate::hf::HfClient;

#[derive(Debug, Serialize)]
pub struct MatchResult {
    pub match_percentage: f64,
    pub feedback: String,
}

/// Computes the semantic similarity score between candidate and job.
pub async fn match_skills(
    client: &HfClient,
    candidate_text: &str,
    job_description: &str,
) -> Result<MatchResult, ToolError> {
    let vectors = client.embed(&[candidate_text, job_description]).await?;
    let score = cosine_similarity(&vectors[0], &vectors[1]) * 100.0;
    Ok(score_to_result(score))
}

fn score_to_result(score: f64) -> MatchResult {
    MatchResult {
        match_percentage: round2(score),
        feedback: feedback_for(score).to_string(),
    }
}

fn feedback_for(score: f64) -> &'static str {
    if score > 80.0 {
        "Excellent Match: Candidate profile strongly aligns with job requirements."
    } else if score > 60.0 {
        "Good Match: Strong potential but some gaps may exist."
    } else if score > 40.0 {
        "Moderate Match: Meets some criteria but lacks depth in key areas."
    } else {
        "Low Match: Candidate profile does not significantly overlap with requirements."
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| (*x as f64) * (*y as f64)).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|y| (*y as f64).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_of_identical_vectors_is_one() {
        let v = vec![0.3, -0.5, 0.8];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_of_orthogonal_vectors_is_zero() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_similarity_085_is_excellent_match() {
        let result = score_to_result(0.85 * 100.0);
        assert_eq!(result.match_percentage, 85.0);
        assert!(result.feedback.starts_with("Excellent Match"));
    }

    #[test]
    fn test_similarity_055_is_moderate_match() {
        let result = score_to_result(0.55 * 100.0);
        assert_eq!(result.match_percentage, 55.0);
        assert!(result.feedback.starts_with("Moderate Match"));
    }

    #[test]
    fn test_band_boundaries() {
        assert!(feedback_for(80.0).starts_with("Good Match"));
        assert!(feedback_for(80.01).starts_with("Excellent Match"));
        assert!(feedback_for(60.0).starts_with("Moderate Match"));
        assert!(feedback_for(40.0).starts_with("Low Match"));
    }

    #[test]
    fn test_percentage_rounds_to_two_decimals() {
        assert_eq!(score_to_result(66.666).match_percentage, 66.67);
    }
}
