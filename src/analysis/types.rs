// Request and response payloads for the six analysis operations
//
// Field names are snake_case on the wire (user_text, session_id, ...).

use serde::{Deserialize, Serialize};

use super::category::ObsessionCategory;
use super::conversation::ConversationTurn;

/// Stage-1 question with its choices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObsessionQuestion {
    pub question: String,
    pub choices: Vec<String>,
}

/// Stage-3 pattern summary with example thoughts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub summary: String,
    pub thought_examples: Vec<String>,
}

/// Stage-4 result before it is shaped into the response payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub summary: String,
    pub category_message: String,
    pub encouragement: String,
    pub category: ObsessionCategory,
}

// ============================================================================
// analyze1
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObsessionAnalysisRequest {
    pub user_text: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObsessionAnalysisResponse {
    pub question: String,
    pub choices: Vec<String>,
    pub session_id: String,
}

// ============================================================================
// analyze2..analyze6
// ============================================================================

/// Shared request body for every history-based stage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryAnalysisRequest {
    pub conversation_history: Vec<ConversationTurn>,
    #[serde(default)]
    pub session_id: String,
}

/// Response for stages 2, 5 and 6
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysisResponse {
    pub session_id: String,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysisResponse {
    pub session_id: String,
    /// Fixed thank-you line
    pub gratitude_message: String,
    pub user_pattern_summary: String,
    /// Fixed question shown above the examples
    pub question: String,
    pub thought_examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnalysisResponse {
    pub session_id: String,
    pub user_pattern_summary: String,
    pub category_message: String,
    pub encouragement: String,
}

// ============================================================================
// General chat
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: String,
    pub follow_up_question: Option<String>,
    pub choices: Option<Vec<String>>,
}
