// Stage orchestrators
//
// Each operation is a fixed, stateless pipeline:
// context -> prompt -> invoke -> normalize. Failures never escape; the
// normalizer substitutes the stage fallback.

use std::sync::Arc;

use super::category::ObsessionCategory;
use super::classifier::Categorizer;
use super::context::extract_user_context;
use super::conversation::{ConversationTurn, Role};
use super::invoker::LlmInvoker;
use super::normalizer::ResponseNormalizer;
use super::prompts::{
    select_prompt, Stage, COUNSELOR_SYSTEM_PROMPT, GRATITUDE_MESSAGE,
    GUIDANCE_FALLBACK_SUMMARY, PATTERN_QUESTION, REFLECTION_FALLBACK, SELF_AWARENESS_FALLBACK,
    TRANSITION_FALLBACK_INTRO,
};
use super::types::*;
use crate::metrics::AnalysisMetrics;
use crate::providers::Message;

/// History turns replayed to the general chat
const CHAT_HISTORY_WINDOW: usize = 5;

/// Characters of user text included in request logs
const LOG_PREVIEW_CHARS: usize = 50;

#[derive(Clone)]
pub struct AnalysisService {
    invoker: LlmInvoker,
    categorizer: Categorizer,
    normalizer: ResponseNormalizer,
}

impl AnalysisService {
    pub fn new(invoker: LlmInvoker) -> Self {
        let metrics = Arc::clone(invoker.metrics());
        Self {
            categorizer: Categorizer::new(invoker.clone()),
            normalizer: ResponseNormalizer::new(metrics),
            invoker,
        }
    }

    pub fn metrics(&self) -> &Arc<AnalysisMetrics> {
        self.invoker.metrics()
    }

    /// Context for a history-based stage, sized by the stage's window
    fn stage_context(stage: Stage, history: &[ConversationTurn]) -> String {
        let window = stage.context_window().unwrap_or_default();
        extract_user_context(history, window)
    }

    async fn invoke_stage(
        &self,
        stage: Stage,
        category: Option<ObsessionCategory>,
        context: &str,
    ) -> Result<String, crate::error::LlmError> {
        let template = select_prompt(stage, category);
        self.invoker
            .invoke(template.system, &stage.user_prompt(context))
            .await
    }

    // ------------------------------------------------------------------
    // Stage 1
    // ------------------------------------------------------------------

    /// Question + up to three choices derived from raw user text
    pub async fn elicit_question(&self, user_text: &str) -> ObsessionQuestion {
        let raw = self
            .invoke_stage(Stage::ElicitQuestion, None, user_text)
            .await;
        self.normalizer.elicit_question(raw, user_text)
    }

    pub async fn analyze1(&self, request: ObsessionAnalysisRequest) -> ObsessionAnalysisResponse {
        tracing::info!(
            "analyze1 request: {}...",
            preview(&request.user_text, LOG_PREVIEW_CHARS)
        );

        let result = self.elicit_question(&request.user_text).await;
        let session_id = request
            .session_id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        tracing::info!(session_id = %session_id, "analyze1 complete: question generated");
        ObsessionAnalysisResponse {
            question: result.question,
            choices: result.choices,
            session_id,
        }
    }

    // ------------------------------------------------------------------
    // Stage 2
    // ------------------------------------------------------------------

    pub async fn reflection(&self, history: &[ConversationTurn]) -> String {
        let stage = Stage::Reflection;
        let context = Self::stage_context(stage, history);
        let raw = self.invoke_stage(stage, None, &context).await;
        self.normalizer
            .free_text(stage.name(), raw, REFLECTION_FALLBACK)
    }

    pub async fn analyze2(&self, request: HistoryAnalysisRequest) -> TextAnalysisResponse {
        tracing::info!(session_id = %request.session_id, "analyze2 request");
        let response = self.reflection(&request.conversation_history).await;
        tracing::info!(session_id = %request.session_id, "analyze2 complete");
        TextAnalysisResponse {
            session_id: request.session_id,
            response,
        }
    }

    // ------------------------------------------------------------------
    // Stage 3
    // ------------------------------------------------------------------

    pub async fn pattern_summary(&self, history: &[ConversationTurn]) -> PatternSummary {
        let stage = Stage::PatternSummary;
        let context = Self::stage_context(stage, history);
        let raw = self.invoke_stage(stage, None, &context).await;
        self.normalizer.pattern_summary(raw)
    }

    pub async fn analyze3(&self, request: HistoryAnalysisRequest) -> PatternAnalysisResponse {
        tracing::info!(session_id = %request.session_id, "analyze3 request");
        let summary = self.pattern_summary(&request.conversation_history).await;
        tracing::info!(session_id = %request.session_id, "analyze3 complete");
        PatternAnalysisResponse {
            session_id: request.session_id,
            gratitude_message: GRATITUDE_MESSAGE.to_string(),
            user_pattern_summary: summary.summary,
            question: PATTERN_QUESTION.to_string(),
            thought_examples: summary.thought_examples,
        }
    }

    // ------------------------------------------------------------------
    // Stage 4
    // ------------------------------------------------------------------

    /// Classify, then summarize with the category's template. The message
    /// and encouragement are fixed copy chosen by category alone.
    pub async fn categorized_guidance(&self, history: &[ConversationTurn]) -> CategoryResponse {
        let stage = Stage::CategoryGuidance;
        let category = self.categorizer.classify(history).await;

        let context = Self::stage_context(stage, history);
        let raw = self.invoke_stage(stage, Some(category), &context).await;
        let summary = self
            .normalizer
            .free_text(stage.name(), raw, GUIDANCE_FALLBACK_SUMMARY);

        CategoryResponse {
            summary,
            category_message: category.category_message().to_string(),
            encouragement: category.encouragement().to_string(),
            category,
        }
    }

    pub async fn analyze4(&self, request: HistoryAnalysisRequest) -> CategoryAnalysisResponse {
        tracing::info!(session_id = %request.session_id, "analyze4 request");
        let result = self
            .categorized_guidance(&request.conversation_history)
            .await;
        tracing::info!(
            session_id = %request.session_id,
            category = %result.category,
            "analyze4 complete"
        );
        CategoryAnalysisResponse {
            session_id: request.session_id,
            user_pattern_summary: result.summary,
            category_message: result.category_message,
            encouragement: result.encouragement,
        }
    }

    // ------------------------------------------------------------------
    // Stage 5
    // ------------------------------------------------------------------

    pub async fn self_awareness_question(&self, history: &[ConversationTurn]) -> String {
        let stage = Stage::SelfAwareness;
        let context = Self::stage_context(stage, history);
        let raw = self.invoke_stage(stage, None, &context).await;
        self.normalizer
            .free_text(stage.name(), raw, SELF_AWARENESS_FALLBACK)
    }

    pub async fn analyze5(&self, request: HistoryAnalysisRequest) -> TextAnalysisResponse {
        tracing::info!(session_id = %request.session_id, "analyze5 request");
        let response = self
            .self_awareness_question(&request.conversation_history)
            .await;
        tracing::info!(session_id = %request.session_id, "analyze5 complete");
        TextAnalysisResponse {
            session_id: request.session_id,
            response,
        }
    }

    // ------------------------------------------------------------------
    // Stage 6
    // ------------------------------------------------------------------

    pub async fn transition_message(&self, history: &[ConversationTurn]) -> String {
        let stage = Stage::Transition;
        let context = Self::stage_context(stage, history);
        let raw = self.invoke_stage(stage, None, &context).await;
        self.normalizer.transition(raw, TRANSITION_FALLBACK_INTRO)
    }

    pub async fn analyze6(&self, request: HistoryAnalysisRequest) -> TextAnalysisResponse {
        tracing::info!(session_id = %request.session_id, "analyze6 request");
        let response = self
            .transition_message(&request.conversation_history)
            .await;
        tracing::info!(session_id = %request.session_id, "analyze6 complete");
        TextAnalysisResponse {
            session_id: request.session_id,
            response,
        }
    }

    // ------------------------------------------------------------------
    // General chat
    // ------------------------------------------------------------------

    /// Free-form counselor reply with the last few history turns replayed
    pub async fn chat(&self, request: ChatRequest) -> ChatResponse {
        let conversation_id = request
            .conversation_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        tracing::info!(conversation_id = %conversation_id, "chat request");

        let start = request
            .conversation_history
            .len()
            .saturating_sub(CHAT_HISTORY_WINDOW);
        let mut messages: Vec<Message> = request.conversation_history[start..]
            .iter()
            .map(|turn| match turn.role {
                Role::User => Message::user(turn.content.display_text()),
                Role::Assistant => Message::assistant(turn.content.display_text()),
            })
            .collect();
        messages.push(Message::user(request.message.clone()));

        let raw = self
            .invoker
            .invoke_messages(COUNSELOR_SYSTEM_PROMPT, messages)
            .await;
        let response = self.normalizer.counselor_reply(raw);

        ChatResponse {
            response,
            conversation_id,
            follow_up_question: None,
            choices: None,
        }
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_counts_chars_not_bytes() {
        assert_eq!(preview("손을 씻어요", 2), "손을");
        assert_eq!(preview("abc", 10), "abc");
    }
}
