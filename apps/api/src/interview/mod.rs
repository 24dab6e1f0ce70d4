//! Conversation orchestration — the per-session interview agent.
//!
//! Policy: conversational continuity above all. A failed backend call
//! produces the fixed fallback reply and leaves history untouched; no
//! error from this module ever reaches the candidate.

use std::sync::Arc;

use tracing::{info, warn};

use crate::interview::prompts::{
    FALLBACK_REPLY, INTERVIEWER_SYSTEM, NERVOUS_ADDENDUM, REPORT_PROMPT_TEMPLATE, REPORT_SYSTEM,
};
use crate::interview::report::{placeholder_report, AssessmentReport, ReportOutcome};
use crate::llm::json::extract_json_payload;
use crate::llm::{ChatRequest, ChatRole, ConversationTurn, TextGenerationBackend};

pub mod prompts;
pub mod report;

/// How many history turns are replayed into a reply prompt.
const REPLY_WINDOW: usize = 4;
/// How many history turns feed the report prompt.
const REPORT_WINDOW: usize = 10;
/// Per-turn character cap when formatting the report transcript.
const REPORT_TURN_CHAR_LIMIT: usize = 200;

const REPLY_MAX_TOKENS: u32 = 150;
const REPLY_TEMPERATURE: f32 = 0.7;
const REPORT_MAX_TOKENS: u32 = 500;
const REPORT_TEMPERATURE: f32 = 0.2;

/// Append-only log of conversation turns. The full log is kept; prompt
/// construction only ever sees a capped window via `recent`.
#[derive(Debug, Default)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    pub fn push(&mut self, role: ChatRole, content: String) {
        self.turns.push(ConversationTurn { role, content });
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The last `n` turns, oldest first.
    pub fn recent(&self, n: usize) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }
}

/// Maintains one session's dialogue state and produces the next assistant
/// utterance. Owns its history exclusively; callers serialize access (one
/// in-flight backend call per session).
pub struct ConversationAgent {
    backend: Arc<dyn TextGenerationBackend>,
    history: ConversationHistory,
}

impl ConversationAgent {
    pub fn new(backend: Arc<dyn TextGenerationBackend>) -> Self {
        Self {
            backend,
            history: ConversationHistory::default(),
        }
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Produces the next assistant reply for the candidate's transcript and
    /// reported emotion. On success, history grows by exactly two entries
    /// (user transcript, then assistant reply). On backend failure, history
    /// is untouched and the fixed fallback reply is returned.
    pub async fn respond(&mut self, transcript: &str, emotion_label: &str) -> String {
        let system = build_system_prompt(emotion_label);
        let user_message = format!("[Emotion: {emotion_label}] {transcript}");

        let request = ChatRequest {
            system: &system,
            prior_turns: self.history.recent(REPLY_WINDOW),
            user_message: &user_message,
            max_tokens: REPLY_MAX_TOKENS,
            temperature: REPLY_TEMPERATURE,
        };

        match self.backend.complete(&request).await {
            Ok(reply) => {
                self.history.push(ChatRole::User, transcript.to_string());
                self.history.push(ChatRole::Assistant, reply.clone());
                reply
            }
            Err(e) => {
                warn!(backend = self.backend.name(), "Reply generation failed: {e}");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Summarizes the conversation into an assessment report.
    ///
    /// Fewer than 2 history entries: returns the fixed placeholder without
    /// a backend call — not enough signal to be worth one. Otherwise asks
    /// the backend for a JSON report over the last 10 turns; non-JSON
    /// output is returned raw, and backend failure falls back to the
    /// placeholder.
    pub async fn report(&self) -> ReportOutcome {
        if self.history.len() < 2 {
            return ReportOutcome::Structured(placeholder_report());
        }

        let prompt =
            REPORT_PROMPT_TEMPLATE.replace("{conversation}", &self.format_report_transcript());

        let request = ChatRequest {
            system: REPORT_SYSTEM,
            prior_turns: &[],
            user_message: &prompt,
            max_tokens: REPORT_MAX_TOKENS,
            temperature: REPORT_TEMPERATURE,
        };

        let text = match self.backend.complete(&request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(backend = self.backend.name(), "Report generation failed: {e}");
                return ReportOutcome::Structured(placeholder_report());
            }
        };

        match extract_json_payload(&text)
            .ok()
            .and_then(|payload| serde_json::from_str::<AssessmentReport>(payload).ok())
        {
            Some(report) => {
                info!("Structured report generated (score {})", report.overall_score);
                ReportOutcome::Structured(report)
            }
            None => {
                warn!("Report output was not parseable JSON; returning raw text");
                ReportOutcome::Raw(text)
            }
        }
    }

    /// Last 10 turns as `Candidate:`/`AI:` lines, each capped at 200 chars.
    fn format_report_transcript(&self) -> String {
        self.history
            .recent(REPORT_WINDOW)
            .iter()
            .map(|turn| {
                let speaker = match turn.role {
                    ChatRole::User => "Candidate",
                    ChatRole::Assistant => "AI",
                };
                format!("{speaker}: {}", truncate_chars(&turn.content, REPORT_TURN_CHAR_LIMIT))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Persona plus the emotion-conditioned addendum. Any label containing
/// "nervous" (case-insensitive) triggers the reassurance directive.
fn build_system_prompt(emotion_label: &str) -> String {
    if emotion_label.to_lowercase().contains("nervous") {
        format!("{INTERVIEWER_SYSTEM}{NERVOUS_ADDENDUM}")
    } else {
        INTERVIEWER_SYSTEM.to_string()
    }
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

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::llm::BackendError;

    /// Test backend that returns a scripted reply (or fails) and counts calls.
    struct ScriptedBackend {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl ScriptedBackend {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerationBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _request: &ChatRequest<'_>) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(BackendError::Timeout(Duration::from_secs(10))),
            }
        }
    }

    #[test]
    fn test_nervous_label_adds_reassurance_directive() {
        for label in ["nervous", "NERVOUS", "Slightly Nervous", "nervous-excited"] {
            let system = build_system_prompt(label);
            assert!(
                system.contains("reassuring statement"),
                "label '{label}' should trigger the addendum"
            );
        }
    }

    #[test]
    fn test_other_labels_do_not_add_directive() {
        for label in ["calm", "confident", "neutral", "excited", ""] {
            let system = build_system_prompt(label);
            assert!(
                !system.contains("reassuring statement"),
                "label '{label}' should not trigger the addendum"
            );
        }
    }

    #[tokio::test]
    async fn test_successful_respond_appends_two_turns() {
        let backend = ScriptedBackend::replying("Tell me about your last project.");
        let mut agent = ConversationAgent::new(backend.clone());

        let reply = agent.respond("I love Rust", "calm").await;

        assert_eq!(reply, "Tell me about your last project.");
        assert_eq!(agent.history().len(), 2);
        let turns = agent.history().recent(2);
        assert_eq!(turns[0].role, ChatRole::User);
        assert_eq!(turns[0].content, "I love Rust");
        assert_eq!(turns[1].role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn test_failed_respond_leaves_history_untouched() {
        let backend = ScriptedBackend::failing();
        let mut agent = ConversationAgent::new(backend.clone());

        let reply = agent.respond("hello", "calm").await;

        assert_eq!(reply, FALLBACK_REPLY);
        assert!(agent.history().is_empty());
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_user_message_carries_emotion_tag() {
        // The tag goes to the backend; history records the bare transcript.
        let backend = ScriptedBackend::replying("ok");
        let mut agent = ConversationAgent::new(backend);

        agent.respond("my answer", "nervous").await;

        assert_eq!(agent.history().recent(2)[0].content, "my answer");
    }

    #[tokio::test]
    async fn test_report_on_short_history_skips_backend() {
        let backend = ScriptedBackend::replying("should never be called");
        let agent = ConversationAgent::new(backend.clone());

        let outcome = agent.report().await;

        assert_eq!(backend.call_count(), 0);
        match outcome {
            ReportOutcome::Structured(report) => assert_eq!(report.overall_score, 70.0),
            ReportOutcome::Raw(_) => panic!("expected the placeholder report"),
        }
    }

    #[tokio::test]
    async fn test_report_parses_structured_json() {
        let backend = ScriptedBackend::replying(
            r#"```json
{"overall_score": 82, "strengths": ["systems thinking", "clear communication", "depth in Rust"],
 "weaknesses": ["limited distributed-systems exposure", "brief answers", "few questions asked"],
 "summary": "Strong candidate.", "recommendation": "hire"}
```"#,
        );
        let mut agent = ConversationAgent::new(backend);
        agent.respond("answer one", "calm").await;

        match agent.report().await {
            ReportOutcome::Structured(report) => {
                assert_eq!(report.overall_score, 82.0);
                assert_eq!(report.strengths.len(), 3);
            }
            ReportOutcome::Raw(_) => panic!("expected structured report"),
        }
    }

    #[tokio::test]
    async fn test_report_returns_raw_text_when_not_json() {
        let backend = ScriptedBackend::replying("The candidate did fine overall.");
        let mut agent = ConversationAgent::new(backend);
        agent.respond("answer one", "calm").await;

        match agent.report().await {
            ReportOutcome::Raw(text) => assert_eq!(text, "The candidate did fine overall."),
            ReportOutcome::Structured(_) => panic!("expected raw text"),
        }
    }

    #[tokio::test]
    async fn test_report_falls_back_to_placeholder_on_backend_failure() {
        let good = ScriptedBackend::replying("fine answer");
        let mut agent = ConversationAgent::new(good);
        agent.respond("answer one", "calm").await;

        // Swap in a failing backend for the report call.
        agent.backend = ScriptedBackend::failing();

        match agent.report().await {
            ReportOutcome::Structured(report) => assert_eq!(report.overall_score, 70.0),
            ReportOutcome::Raw(_) => panic!("expected the placeholder report"),
        }
    }

    #[test]
    fn test_recent_window_caps_replayed_turns() {
        let mut history = ConversationHistory::default();
        for i in 0..6 {
            history.push(ChatRole::User, format!("turn {i}"));
        }
        let window = history.recent(4);
        assert_eq!(window.len(), 4);
        assert_eq!(window[0].content, "turn 2");
        assert_eq!(window[3].content, "turn 5");
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        let text = "héllo wörld".repeat(40);
        let truncated = truncate_chars(&text, 200);
        assert_eq!(truncated.chars().count(), 200);

        assert_eq!(truncate_chars("short", 200), "short");
    }
}
