// Integration tests for the obsession categorizer

mod common;

use common::{invoker_with, ScriptedProvider};
use std::sync::Arc;

use mindit::analysis::prompts::CLASSIFIER_PROMPT;
use mindit::analysis::{Categorizer, ConversationTurn, ObsessionCategory};

async fn classify_with(reply: &str, history: &[ConversationTurn]) -> ObsessionCategory {
    let provider = Arc::new(ScriptedProvider::replying(reply));
    Categorizer::new(invoker_with(provider)).classify(history).await
}

#[tokio::test]
async fn test_valid_labels_accepted() {
    let history = vec![ConversationTurn::user("문을 잠갔는지 계속 확인해요")];
    assert_eq!(classify_with("checking", &history).await, ObsessionCategory::Checking);
    assert_eq!(
        classify_with(" Contamination\n", &history).await,
        ObsessionCategory::Contamination
    );
    assert_eq!(classify_with("other", &history).await, ObsessionCategory::Other);
}

#[tokio::test]
async fn test_sentence_containing_label_is_other() {
    let history = vec![ConversationTurn::user("문을 잠갔는지 계속 확인해요")];
    let category = classify_with("This looks like checking to me.", &history).await;
    assert_eq!(category, ObsessionCategory::Other);
}

#[tokio::test]
async fn test_provider_failure_is_other() {
    let provider = Arc::new(ScriptedProvider::failing());
    let categorizer = Categorizer::new(invoker_with(provider));
    let category = categorizer
        .classify(&[ConversationTurn::user("손을 씻어요")])
        .await;
    assert_eq!(category, ObsessionCategory::Other);
}

#[tokio::test]
async fn test_empty_history_is_other_on_empty_reply() {
    assert_eq!(classify_with("", &[]).await, ObsessionCategory::Other);
}

#[tokio::test]
async fn test_uses_classifier_prompt_and_last_five_user_turns() {
    let provider = Arc::new(ScriptedProvider::replying("checking"));
    let categorizer = Categorizer::new(invoker_with(Arc::clone(&provider)));
    let history: Vec<ConversationTurn> = (1..=7)
        .map(|i| ConversationTurn::user(format!("u{i}")))
        .collect();

    categorizer.classify(&history).await;

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].system.as_deref(), Some(CLASSIFIER_PROMPT));
    assert_eq!(requests[0].messages[0].content, "대화 히스토리: u3 u4 u5 u6 u7");
}

#[tokio::test]
async fn test_category_counted() {
    let provider = Arc::new(ScriptedProvider::replying("contamination"));
    let invoker = invoker_with(provider);
    let metrics = Arc::clone(invoker.metrics());
    Categorizer::new(invoker)
        .classify(&[ConversationTurn::user("손이 더러워요")])
        .await;
    assert_eq!(metrics.category_count("contamination"), 1);
}
