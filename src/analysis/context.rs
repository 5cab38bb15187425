// Context extraction from conversation history

use super::conversation::ConversationTurn;

/// Build the prompt context from the last `window` user turns.
///
/// Assistant turns are skipped, each user turn is reduced to its display
/// text, and the most recent `window` of them are joined with a single
/// space in chronological order. No user turns yields an empty string.
pub fn extract_user_context(history: &[ConversationTurn], window: usize) -> String {
    let user_texts: Vec<String> = history
        .iter()
        .filter(|turn| turn.is_user())
        .map(|turn| turn.content.display_text())
        .collect();

    let start = user_texts.len().saturating_sub(window);
    user_texts[start..].join(" ")
}
