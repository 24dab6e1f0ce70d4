//! Proficiency assessment via zero-shot classification: CEFR scale for the
//! "language" domain, a generic skill-level scale for everything else.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::ToolError;
use crate::hf::HfClient;

const LANGUAGE_LABELS: &[&str] = &[
    "A1 - Beginner",
    "A2 - Elementary",
    "B1 - Intermediate",
    "B2 - Upper Intermediate",
    "C1 - Advanced",
    "C2 - Proficient",
];

const SKILL_LABELS: &[&str] = &["Beginner", "Intermediate", "Advanced", "Expert"];

#[derive(Debug, Serialize)]
pub struct ProficiencyResult {
    pub proficiency_level: String,
    pub confidence: f64,
    pub all_scores: BTreeMap<String, f64>,
}

/// Classifies the text into proficiency levels for the given domain.
pub async fn assess(
    client: &HfClient,
    text: &str,
    domain: &str,
) -> Result<ProficiencyResult, ToolError> {
    let result = client.zero_shot(text, labels_for_domain(domain)).await?;

    // Labels arrive sorted by descending score; the top one wins.
    let proficiency_level = result.labels[0].clone();
    let confidence = round4(result.scores[0]);
    let all_scores = result
        .labels
        .into_iter()
        .zip(result.scores)
        .collect::<BTreeMap<String, f64>>();

    Ok(ProficiencyResult {
        proficiency_level,
        confidence,
        all_scores,
    })
}

fn labels_for_domain(domain: &str) -> &'static [&'static str] {
    if domain == "language" {
        LANGUAGE_LABELS
    } else {
        SKILL_LABELS
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_domain_uses_cefr_labels() {
        let labels = labels_for_domain("language");
        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0], "A1 - Beginner");
    }

    #[test]
    fn test_other_domains_use_skill_labels() {
        for domain in ["general", "backend", "data", ""] {
            assert_eq!(labels_for_domain(domain), SKILL_LABELS);
        }
    }

    #[test]
    fn test_confidence_rounds_to_four_decimals() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(0.9), 0.9);
    }
}
