// Error taxonomy for the analysis pipeline
//
// None of these reach the HTTP caller: every variant is recovered by
// substituting the stage's fallback value.

use std::time::Duration;
use thiserror::Error;

/// The completion call could not produce usable text.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM provider unavailable: {0}")]
    Unavailable(String),

    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),

    #[error("LLM returned an empty response")]
    EmptyResponse,
}

impl LlmError {
    /// Short label used for log fields and metric labels
    pub fn reason(&self) -> &'static str {
        match self {
            LlmError::Unavailable(_) => "llm_unavailable",
            LlmError::Timeout(_) => "llm_timeout",
            LlmError::EmptyResponse => "llm_empty",
        }
    }
}

/// Structured-mode output could not be turned into the expected shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("no JSON object found in model output")]
    MissingJsonObject,

    #[error("malformed JSON in model output: {0}")]
    Malformed(String),

    #[error("model output violates schema: {0}")]
    Schema(String),
}

impl NormalizeError {
    pub fn reason(&self) -> &'static str {
        match self {
            NormalizeError::MissingJsonObject => "missing_json",
            NormalizeError::Malformed(_) => "malformed_json",
            NormalizeError::Schema(_) => "schema_violation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reasons_are_distinct() {
        let reasons = [
            LlmError::Unavailable("x".into()).reason(),
            LlmError::Timeout(Duration::from_secs(1)).reason(),
            LlmError::EmptyResponse.reason(),
            NormalizeError::MissingJsonObject.reason(),
            NormalizeError::Malformed("x".into()).reason(),
            NormalizeError::Schema("x".into()).reason(),
        ];
        let unique: std::collections::HashSet<_> = reasons.iter().collect();
        assert_eq!(unique.len(), reasons.len());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            LlmError::EmptyResponse.to_string(),
            "LLM returned an empty response"
        );
        assert!(NormalizeError::Schema("choices".into())
            .to_string()
            .contains("choices"));
    }
}
