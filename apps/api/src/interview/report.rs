//! Assessment report types and the deterministic placeholder.

use serde::{Deserialize, Serialize};

/// Final candidate assessment derived from conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub overall_score: f32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub summary: String,
    pub recommendation: String,
}

/// What a report request actually produced: the structured report when the
/// model emitted parseable JSON, or its raw text when it did not. Either
/// way the caller gets a usable payload.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReportOutcome {
    Structured(AssessmentReport),
    Raw(String),
}

/// Fixed report returned when history is too short to assess, or when the
/// backend fails outright. Never involves a model call.
pub fn placeholder_report() -> AssessmentReport {
    AssessmentReport {
        overall_score: 70.0,
        strengths: vec![
            "Engaged with the interview process".to_string(),
            "Willing to participate in technical assessment".to_string(),
            "Showed interest in the role".to_string(),
        ],
        weaknesses: vec![
            "Limited conversation data for full assessment".to_string(),
            "Needs more in-depth technical discussion".to_string(),
            "Interview duration was brief".to_string(),
        ],
        summary: "Candidate completed the initial interview process. More extensive \
                  technical discussion would be beneficial for a complete evaluation."
            .to_string(),
        recommendation: "Consider for next round - Schedule a longer technical interview \
                         to better assess capabilities."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_report_is_fixed() {
        let report = placeholder_report();
        assert_eq!(report.overall_score, 70.0);
        assert_eq!(report.strengths.len(), 3);
        assert_eq!(report.weaknesses.len(), 3);
    }

    #[test]
    fn test_report_outcome_serializes_untagged() {
        let structured = ReportOutcome::Structured(placeholder_report());
        let value = serde_json::to_value(&structured).unwrap();
        assert_eq!(value["overall_score"], 70.0);

        let raw = ReportOutcome::Raw("model said something unparseable".to_string());
        let value = serde_json::to_value(&raw).unwrap();
        assert!(value.is_string());
    }
}
