// Single-shot LLM invocation
//
// One system instruction plus user content in, trimmed text out. Any
// provider error, timeout or empty reply becomes an `LlmError`; there is
// no retry at this layer.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::constants::{DEFAULT_MAX_TOKENS, DEFAULT_REQUEST_TIMEOUT_SECS, LLM_TEMPERATURE};
use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::metrics::AnalysisMetrics;
use crate::providers::{LlmProvider, Message, ProviderRequest};

/// Per-process invocation settings, fixed at startup
#[derive(Debug, Clone)]
pub struct InvokerSettings {
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for InvokerSettings {
    fn default() -> Self {
        Self {
            model: crate::config::constants::DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl From<&LlmConfig> for InvokerSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            timeout: config.request_timeout(),
        }
    }
}

#[derive(Clone)]
pub struct LlmInvoker {
    provider: Arc<dyn LlmProvider>,
    settings: InvokerSettings,
    metrics: Arc<AnalysisMetrics>,
}

impl LlmInvoker {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        settings: InvokerSettings,
        metrics: Arc<AnalysisMetrics>,
    ) -> Self {
        Self {
            provider,
            settings,
            metrics,
        }
    }

    pub fn metrics(&self) -> &Arc<AnalysisMetrics> {
        &self.metrics
    }

    /// `invoke(systemInstruction, userContent) -> rawText`
    pub async fn invoke(&self, system: &str, user_content: &str) -> Result<String, LlmError> {
        self.invoke_messages(system, vec![Message::user(user_content)])
            .await
    }

    /// Same contract as [`invoke`](Self::invoke) with a full message list
    pub async fn invoke_messages(
        &self,
        system: &str,
        messages: Vec<Message>,
    ) -> Result<String, LlmError> {
        let request = ProviderRequest::new(messages)
            .with_model(self.settings.model.clone())
            .with_max_tokens(self.settings.max_tokens)
            .with_system(system)
            .with_temperature(LLM_TEMPERATURE);

        let started = Instant::now();
        let outcome = tokio::time::timeout(
            self.settings.timeout,
            self.provider.send_message(&request),
        )
        .await;
        let elapsed = started.elapsed().as_secs_f64();

        let result = match outcome {
            Err(_) => Err(LlmError::Timeout(self.settings.timeout)),
            Ok(Err(e)) => Err(LlmError::Unavailable(format!("{e:#}"))),
            Ok(Ok(response)) => {
                let text = response.text.trim().to_string();
                if text.is_empty() {
                    Err(LlmError::EmptyResponse)
                } else {
                    Ok(text)
                }
            }
        };

        match &result {
            Ok(text) => {
                self.metrics.observe_llm_call("ok", elapsed);
                tracing::debug!(
                    provider = self.provider.name(),
                    chars = text.chars().count(),
                    elapsed_ms = (elapsed * 1000.0) as u64,
                    "LLM call succeeded"
                );
            }
            Err(e) => {
                self.metrics.observe_llm_call(e.reason(), elapsed);
                tracing::error!(provider = self.provider.name(), "LLM call failed: {}", e);
            }
        }

        result
    }
}
