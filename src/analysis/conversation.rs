// Conversation history as supplied by the caller
//
// Turn content arrives as a string, a list, or a mapping. It is modelled
// as a closed union so any other JSON shape is rejected at deserialization
// instead of being stringified by accident.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Raw content of a turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TurnContent {
    Text(String),
    List(Vec<Value>),
    Mapping(Map<String, Value>),
}

impl Default for TurnContent {
    fn default() -> Self {
        TurnContent::Text(String::new())
    }
}

impl TurnContent {
    /// Canonical display string for this content.
    ///
    /// - text: unchanged
    /// - list: each element's textual form, joined with ", "
    /// - mapping: compact JSON, all keys and values preserved
    pub fn display_text(&self) -> String {
        match self {
            TurnContent::Text(text) => text.clone(),
            TurnContent::List(items) => items
                .iter()
                .map(value_text)
                .collect::<Vec<_>>()
                .join(", "),
            TurnContent::Mapping(map) => Value::Object(map.clone()).to_string(),
        }
    }
}

impl From<&str> for TurnContent {
    fn from(text: &str) -> Self {
        TurnContent::Text(text.to_string())
    }
}

impl From<String> for TurnContent {
    fn from(text: String) -> Self {
        TurnContent::Text(text)
    }
}

/// Textual form of a single list element: strings verbatim, everything else as JSON
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One entry of the conversation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    #[serde(default)]
    pub content: TurnContent,
}

impl ConversationTurn {
    pub fn user(content: impl Into<TurnContent>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<TurnContent>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
