// LLM provider abstraction
//
// The analysis pipeline talks to a single completion capability through
// this trait; the OpenAI-compatible HTTP provider is the production
// implementation and tests substitute scripted ones.

use anyhow::Result;
use async_trait::async_trait;

pub mod openai;
pub mod retry;
pub mod types;

pub use openai::OpenAIProvider;
pub use retry::with_retry;
pub use types::{Message, ProviderRequest, ProviderResponse};

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a message and get a complete response
    async fn send_message(&self, request: &ProviderRequest) -> Result<ProviderResponse>;

    /// Get the provider name (e.g., "openai")
    fn name(&self) -> &str;
}
