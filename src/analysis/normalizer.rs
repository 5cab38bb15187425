// Response normalization
//
// Turns raw model text (or an invocation failure) into the stage's output
// shape. This is the only place fallback values are substituted, so every
// substitution is logged and counted here.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

use super::prompts::{
    Stage, CHAT_FALLBACK, CHOICE_SUFFIX, CHOICE_SUFFIX_MARKER, ELICIT_FALLBACK_CHOICES,
    ELICIT_FALLBACK_QUESTION_SUFFIX, PATTERN_FALLBACK_SUMMARY, PATTERN_FALLBACK_THOUGHTS,
    QUESTION_TRAILER, TRANSITION_CLOSING,
};
use super::types::{ObsessionQuestion, PatternSummary};
use crate::error::{LlmError, NormalizeError};
use crate::metrics::AnalysisMetrics;

const MAX_CHOICES: usize = 3;
const THOUGHT_EXAMPLES: usize = 3;

/// Slice from the first `{` to the last `}` inclusive, if both exist in order
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parse the embedded JSON object of `raw` into `T`
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Result<T, NormalizeError> {
    let json = extract_json_object(raw).ok_or(NormalizeError::MissingJsonObject)?;
    serde_json::from_str(json).map_err(|e| {
        if e.is_data() {
            NormalizeError::Schema(e.to_string())
        } else {
            NormalizeError::Malformed(e.to_string())
        }
    })
}

/// Ensure a terminal question mark, then append the fixed trailer once
pub fn format_question(question: &str) -> String {
    let mut formatted = question.trim().to_string();
    if !formatted.ends_with('?') && !formatted.ends_with('？') {
        formatted.push('?');
    }
    formatted.push(' ');
    formatted.push_str(QUESTION_TRAILER);
    formatted
}

/// Trim and add the "when" suffix unless already present
pub fn format_choice(choice: &str) -> String {
    let trimmed = choice.trim();
    if trimmed.ends_with(CHOICE_SUFFIX_MARKER) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{CHOICE_SUFFIX}")
    }
}

/// Keep the first three choices, in order, each trimmed and suffixed.
/// Fewer than three are returned as-is; nothing is invented.
pub fn format_choices(choices: &[String]) -> Vec<String> {
    choices
        .iter()
        .take(MAX_CHOICES)
        .map(|c| format_choice(c))
        .collect()
}

/// Stage-6 body followed by a blank line and the fixed closing sentence
pub fn with_transition_closing(body: &str) -> String {
    format!("{}\n\n{}", body.trim(), TRANSITION_CLOSING)
}

/// The stage-1 value used whenever the model output is unusable
pub fn elicit_fallback(user_text: &str) -> ObsessionQuestion {
    ObsessionQuestion {
        question: format!(
            "{}{} {}",
            user_text,
            ELICIT_FALLBACK_QUESTION_SUFFIX,
            QUESTION_TRAILER
        ),
        choices: ELICIT_FALLBACK_CHOICES.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn pattern_fallback() -> PatternSummary {
    PatternSummary {
        summary: PATTERN_FALLBACK_SUMMARY.to_string(),
        thought_examples: PATTERN_FALLBACK_THOUGHTS
            .iter()
            .map(|t| t.to_string())
            .collect(),
    }
}

/// Counselor-style framing for chat replies
pub fn format_counselor_reply(raw: &str) -> String {
    let mut reply = raw.trim().to_string();
    if !reply.starts_with("안녕하세요") && !reply.starts_with("말씀해주신") {
        reply = format!("말씀해주신 내용을 잘 들었습니다. {reply}");
    }
    if !reply.ends_with('.') && !reply.ends_with('?') {
        reply.push('.');
    }
    reply
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    #[serde(default)]
    choices: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawPatternSummary {
    user_pattern_summary: String,
    thought_examples: Vec<String>,
}

fn parse_question(raw: &str) -> Result<ObsessionQuestion, NormalizeError> {
    let parsed: RawQuestion = parse_structured(raw)?;
    if parsed.question.trim().is_empty() {
        return Err(NormalizeError::Schema("question is empty".to_string()));
    }

    Ok(ObsessionQuestion {
        question: format_question(&parsed.question),
        choices: format_choices(&parsed.choices),
    })
}

fn parse_pattern_summary(raw: &str) -> Result<PatternSummary, NormalizeError> {
    let parsed: RawPatternSummary = parse_structured(raw)?;
    let summary = parsed.user_pattern_summary.trim().to_string();
    if summary.is_empty() {
        return Err(NormalizeError::Schema(
            "user_pattern_summary is empty".to_string(),
        ));
    }

    let thought_examples: Vec<String> = parsed
        .thought_examples
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .take(THOUGHT_EXAMPLES)
        .map(str::to_string)
        .collect();
    if thought_examples.len() < THOUGHT_EXAMPLES {
        return Err(NormalizeError::Schema(format!(
            "expected {} thought_examples, got {}",
            THOUGHT_EXAMPLES,
            thought_examples.len()
        )));
    }

    Ok(PatternSummary {
        summary,
        thought_examples,
    })
}

/// Stage-aware normalizer with centralized fallback accounting
#[derive(Clone)]
pub struct ResponseNormalizer {
    metrics: Arc<AnalysisMetrics>,
}

impl ResponseNormalizer {
    pub fn new(metrics: Arc<AnalysisMetrics>) -> Self {
        Self { metrics }
    }

    fn substitute(&self, stage: &str, reason: &str, detail: &dyn std::fmt::Display) {
        tracing::warn!(stage, reason, "Substituting fallback response: {}", detail);
        self.metrics.record_fallback(stage, reason);
    }

    /// Stage 1: structured question + choices
    pub fn elicit_question(
        &self,
        raw: Result<String, LlmError>,
        user_text: &str,
    ) -> ObsessionQuestion {
        let stage = Stage::ElicitQuestion.name();
        match raw {
            Ok(text) => match parse_question(&text) {
                Ok(question) => {
                    if question.choices.len() < MAX_CHOICES {
                        tracing::warn!(
                            stage,
                            choices = question.choices.len(),
                            "Model returned fewer than 3 choices; passing through without padding"
                        );
                    }
                    question
                }
                Err(e) => {
                    self.substitute(stage, e.reason(), &e);
                    elicit_fallback(user_text)
                }
            },
            Err(e) => {
                self.substitute(stage, e.reason(), &e);
                elicit_fallback(user_text)
            }
        }
    }

    /// Stage 3: structured summary + exactly three thought examples
    pub fn pattern_summary(&self, raw: Result<String, LlmError>) -> PatternSummary {
        let stage = Stage::PatternSummary.name();
        match raw {
            Ok(text) => parse_pattern_summary(&text).unwrap_or_else(|e| {
                self.substitute(stage, e.reason(), &e);
                pattern_fallback()
            }),
            Err(e) => {
                self.substitute(stage, e.reason(), &e);
                pattern_fallback()
            }
        }
    }

    /// Free-text stages: trimmed model text, or `fallback` on failure
    pub fn free_text(&self, stage: &str, raw: Result<String, LlmError>, fallback: &str) -> String {
        match raw {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    let e = LlmError::EmptyResponse;
                    self.substitute(stage, e.reason(), &e);
                    fallback.to_string()
                } else {
                    trimmed.to_string()
                }
            }
            Err(e) => {
                self.substitute(stage, e.reason(), &e);
                fallback.to_string()
            }
        }
    }

    /// General chat: counselor framing on success, the fixed apology
    /// (unformatted) on failure
    pub fn counselor_reply(&self, raw: Result<String, LlmError>) -> String {
        match raw {
            Ok(text) => format_counselor_reply(&text),
            Err(e) => {
                self.substitute("chat", e.reason(), &e);
                CHAT_FALLBACK.to_string()
            }
        }
    }

    /// Stage 6: free text with the fixed closing always appended
    pub fn transition(&self, raw: Result<String, LlmError>, fallback_intro: &str) -> String {
        let body = self.free_text(Stage::Transition.name(), raw, fallback_intro);
        with_transition_closing(&body)
    }
}
