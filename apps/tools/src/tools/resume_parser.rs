//! Resume entity extraction: NER over the raw text plus a static keyword
//! lookup fallback for technology skills (generic NER only yields
//! PER/ORG/LOC/MISC, so skills come from the keyword list).

use std::collections::HashSet;

use serde::Serialize;

use crate::errors::ToolError;
use crate::hf::{HfClient, NerEntity};

/// Tech keywords matched case-insensitively against the raw resume text.
const COMMON_SKILLS: &[&str] = &[
    "Python",
    "JavaScript",
    "React",
    "Next.js",
    "FastAPI",
    "PostgreSQL",
    "Docker",
    "Kubernetes",
    "AWS",
    "TypeScript",
    "Java",
    "C++",
    "Machine Learning",
];

#[derive(Debug, Serialize)]
pub struct ParsedResume {
    pub skills: Vec<String>,
    pub companies: Vec<String>,
    pub locations: Vec<String>,
    pub raw_entities: Vec<NerEntity>,
}

/// Extracts structured entities from resume text.
pub async fn parse(client: &HfClient, text: &str) -> Result<ParsedResume, ToolError> {
    let entities = client.ner(text).await?;

    let mut companies = Vec::new();
    let mut locations = Vec::new();
    for entity in &entities {
        match entity.entity_group.as_str() {
            "ORG" => companies.push(entity.word.clone()),
            "LOC" => locations.push(entity.word.clone()),
            _ => {}
        }
    }

    Ok(ParsedResume {
        skills: extract_keyword_skills(text),
        companies,
        locations,
        raw_entities: entities,
    })
}

/// Case-insensitive keyword lookup, deduplicated. Order is whatever the
/// set iteration yields — callers must not rely on it.
fn extract_keyword_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    let found: HashSet<&str> = COMMON_SKILLS
        .iter()
        .copied()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .collect();
    found.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_is_case_insensitive() {
        let skills = extract_keyword_skills("Shipped PYTHON services on kubernetes.");
        assert!(skills.contains(&"Python".to_string()));
        assert!(skills.contains(&"Kubernetes".to_string()));
    }

    #[test]
    fn test_keyword_lookup_deduplicates() {
        let skills = extract_keyword_skills("Docker, docker, and more Docker.");
        assert_eq!(skills.iter().filter(|s| *s == "Docker").count(), 1);
    }

    #[test]
    fn test_no_matches_yields_empty_list() {
        assert!(extract_keyword_skills("Fluent in French and Spanish.").is_empty());
    }

    #[test]
    fn test_multiword_skill_matches() {
        let skills = extract_keyword_skills("Applied machine learning to fraud detection.");
        assert_eq!(skills, vec!["Machine Learning".to_string()]);
    }
}
