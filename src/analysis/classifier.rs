// Three-way obsession classifier (contamination / checking / other)

use super::category::ObsessionCategory;
use super::context::extract_user_context;
use super::conversation::ConversationTurn;
use super::invoker::LlmInvoker;
use super::prompts::{Stage, CLASSIFIER_PROMPT};

/// User turns considered when classifying
const CLASSIFIER_WINDOW: usize = 5;

#[derive(Clone)]
pub struct Categorizer {
    invoker: LlmInvoker,
}

impl Categorizer {
    pub fn new(invoker: LlmInvoker) -> Self {
        Self { invoker }
    }

    /// Classify the recent user turns. Never fails: an invalid label or a
    /// failed call both yield [`ObsessionCategory::Other`].
    pub async fn classify(&self, history: &[ConversationTurn]) -> ObsessionCategory {
        let context = extract_user_context(history, CLASSIFIER_WINDOW);
        let user_prompt = Stage::CategoryGuidance.user_prompt(&context);

        let category = match self.invoker.invoke(CLASSIFIER_PROMPT, &user_prompt).await {
            Ok(raw) => ObsessionCategory::parse_label(&raw).unwrap_or_else(|| {
                tracing::warn!(label = %raw, "Classifier returned an invalid label, using 'other'");
                ObsessionCategory::Other
            }),
            Err(e) => {
                tracing::warn!("Classifier call failed, using 'other': {}", e);
                ObsessionCategory::Other
            }
        };

        self.invoker.metrics().record_category(category.as_str());
        tracing::info!(category = %category, "Classified obsession category");
        category
    }
}
