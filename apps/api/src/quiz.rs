//! Quiz generation — exactly 10 multiple-choice questions from a resume.
//!
//! Unlike the conversational path, quiz generation is one-shot: failures
//! propagate to the HTTP boundary instead of being absorbed, and no retry
//! is attempted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::llm::json::extract_json_payload;
use crate::llm::{BackendError, ChatRequest, TextGenerationBackend};

/// A quiz set is exactly this many questions — not fewer, not more.
pub const QUIZ_SIZE: usize = 10;
/// Each question carries exactly this many answer options.
pub const OPTION_COUNT: usize = 4;
/// Only the first part of the resume feeds the prompt.
const RESUME_CHAR_LIMIT: usize = 2000;

const QUIZ_MAX_TOKENS: u32 = 2048;
const QUIZ_TEMPERATURE: f32 = 0.7;

pub const QUIZ_SYSTEM: &str = "You are a technical quiz generator. Output only valid JSON.";

/// Quiz prompt template. Replace `{domain}` and `{resume}` before sending.
const QUIZ_PROMPT_TEMPLATE: &str = r#"You are a technical recruiter creating a quiz for a {domain} position. Based on the candidate's resume below, generate EXACTLY 10 multiple-choice questions. Questions should test their claimed skills, experience, and domain knowledge.
Format: Return ONLY valid JSON array with this structure:
[
  {"question": "...", "options": ["A", "B", "C", "D"], "correct_index": 0},
  ...
]

Resume:
{resume}

Generate 10 {domain}-specific questions now:"#;

/// One multiple-choice question: exactly 4 options, correct_index in [0,3].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl QuizQuestion {
    fn is_valid(&self) -> bool {
        !self.question.trim().is_empty()
            && self.options.len() == OPTION_COUNT
            && self.correct_index < OPTION_COUNT
    }
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("quiz backend call failed: {0}")]
    Backend(#[from] BackendError),

    #[error("quiz output was not a valid JSON array: {0}")]
    Parse(String),

    #[error("only {count} valid questions generated (need {QUIZ_SIZE})")]
    InsufficientQuestions { count: usize },
}

/// Produces quiz sets from resume text and a target domain. Stateless
/// beyond the injected backend handle.
pub struct QuizGenerator {
    backend: Arc<dyn TextGenerationBackend>,
}

impl QuizGenerator {
    pub fn new(backend: Arc<dyn TextGenerationBackend>) -> Self {
        Self { backend }
    }

    /// Generates exactly `QUIZ_SIZE` questions. Over-generation is silently
    /// truncated to the first 10; under-generation fails with the actual
    /// count. Invalid items are dropped before the count rule applies.
    pub async fn generate(
        &self,
        resume_text: &str,
        domain: &str,
    ) -> Result<Vec<QuizQuestion>, QuizError> {
        let resume = truncate_chars(resume_text, RESUME_CHAR_LIMIT);
        let prompt = QUIZ_PROMPT_TEMPLATE
            .replace("{domain}", domain)
            .replace("{resume}", resume);

        let request = ChatRequest {
            system: QUIZ_SYSTEM,
            prior_turns: &[],
            user_message: &prompt,
            max_tokens: QUIZ_MAX_TOKENS,
            temperature: QUIZ_TEMPERATURE,
        };

        let raw = self.backend.complete(&request).await?;
        let questions = parse_quiz_output(&raw)?;

        info!(
            backend = self.backend.name(),
            domain, "Generated {} quiz questions", questions.len()
        );
        Ok(questions)
    }
}

/// Parses raw model output into a validated quiz set.
fn parse_quiz_output(raw: &str) -> Result<Vec<QuizQuestion>, QuizError> {
    let payload = extract_json_payload(raw).map_err(|e| QuizError::Parse(e.to_string()))?;

    let items: Vec<serde_json::Value> =
        serde_json::from_str(payload).map_err(|e| QuizError::Parse(e.to_string()))?;

    let total = items.len();
    let mut questions: Vec<QuizQuestion> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<QuizQuestion>(item).ok())
        .filter(QuizQuestion::is_valid)
        .collect();

    if questions.len() < total {
        warn!(
            "Dropped {} malformed quiz items of {total}",
            total - questions.len()
        );
    }

    if questions.len() < QUIZ_SIZE {
        return Err(QuizError::InsufficientQuestions {
            count: questions.len(),
        });
    }
    questions.truncate(QUIZ_SIZE);
    Ok(questions)
}

/// Truncates to at most `limit` characters on a char boundary.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question_json(i: usize) -> String {
        format!(
            r#"{{"question": "Question {i}?", "options": ["a", "b", "c", "d"], "correct_index": {}}}"#,
            i % 4
        )
    }

    fn quiz_json(n: usize) -> String {
        let items: Vec<String> = (0..n).map(question_json).collect();
        format!("[{}]", items.join(","))
    }

    #[test]
    fn test_twelve_questions_truncate_to_first_ten() {
        let questions = parse_quiz_output(&quiz_json(12)).unwrap();
        assert_eq!(questions.len(), QUIZ_SIZE);
        assert_eq!(questions[0].question, "Question 0?");
        assert_eq!(questions[9].question, "Question 9?");
    }

    #[test]
    fn test_five_questions_is_insufficient() {
        match parse_quiz_output(&quiz_json(5)) {
            Err(QuizError::InsufficientQuestions { count }) => assert_eq!(count, 5),
            other => panic!("expected InsufficientQuestions, got {other:?}"),
        }
    }

    #[test]
    fn test_exactly_ten_questions_pass_through() {
        let questions = parse_quiz_output(&quiz_json(10)).unwrap();
        assert_eq!(questions.len(), QUIZ_SIZE);
    }

    #[test]
    fn test_fenced_output_is_accepted() {
        let fenced = format!("```json\n{}\n```", quiz_json(10));
        assert_eq!(parse_quiz_output(&fenced).unwrap().len(), QUIZ_SIZE);
    }

    #[test]
    fn test_non_json_output_is_a_parse_error() {
        match parse_quiz_output("I could not generate a quiz, sorry.") {
            Err(QuizError::Parse(_)) => {}
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_items_are_dropped_then_counted() {
        // 10 good items plus one missing its options: the bad item is
        // dropped and the survivors still satisfy the count rule.
        let mut items: Vec<String> = (0..10).map(question_json).collect();
        items.push(r#"{"question": "No options?", "correct_index": 0}"#.to_string());
        let raw = format!("[{}]", items.join(","));

        let questions = parse_quiz_output(&raw).unwrap();
        assert_eq!(questions.len(), QUIZ_SIZE);
        assert!(questions.iter().all(|q| q.options.len() == OPTION_COUNT));
    }

    #[test]
    fn test_dropped_items_can_make_a_batch_insufficient() {
        let mut items: Vec<String> = (0..9).map(question_json).collect();
        // 3 options instead of 4
        items.push(r#"{"question": "Bad?", "options": ["a", "b", "c"], "correct_index": 0}"#.to_string());
        let raw = format!("[{}]", items.join(","));

        match parse_quiz_output(&raw) {
            Err(QuizError::InsufficientQuestions { count }) => assert_eq!(count, 9),
            other => panic!("expected InsufficientQuestions, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_index_is_invalid() {
        let mut items: Vec<String> = (0..9).map(question_json).collect();
        items.push(
            r#"{"question": "Bad?", "options": ["a", "b", "c", "d"], "correct_index": 4}"#
                .to_string(),
        );
        let raw = format!("[{}]", items.join(","));
        assert!(matches!(
            parse_quiz_output(&raw),
            Err(QuizError::InsufficientQuestions { count: 9 })
        ));
    }

    #[test]
    fn test_resume_truncation_cap() {
        let long = "x".repeat(5000);
        assert_eq!(truncate_chars(&long, RESUME_CHAR_LIMIT).len(), 2000);
    }
}
