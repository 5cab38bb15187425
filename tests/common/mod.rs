// Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mindit::analysis::{AnalysisService, InvokerSettings, LlmInvoker};
use mindit::metrics::AnalysisMetrics;
use mindit::providers::{LlmProvider, ProviderRequest, ProviderResponse};

type Script = dyn Fn(&ProviderRequest) -> anyhow::Result<String> + Send + Sync;
type Delay = dyn Fn(&ProviderRequest) -> Duration + Send + Sync;

/// In-process provider driven by a closure; records every request
pub struct ScriptedProvider {
    script: Box<Script>,
    delay: Option<Box<Delay>>,
    pub requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&ProviderRequest) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Self {
            script: Box::new(script),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep (on the tokio clock) before answering each request
    pub fn with_delay<F>(mut self, delay: F) -> Self
    where
        F: Fn(&ProviderRequest) -> Duration + Send + Sync + 'static,
    {
        self.delay = Some(Box::new(delay));
        self
    }

    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    pub fn failing() -> Self {
        Self::new(|_| Err(anyhow::anyhow!("connection refused")))
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Content of the last message of every recorded request
    pub fn user_prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| r.messages.last().map(|m| m.content.clone()))
            .collect()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn send_message(&self, request: &ProviderRequest) -> anyhow::Result<ProviderResponse> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(request)).await;
        }
        let text = (self.script)(request)?;
        Ok(ProviderResponse {
            id: "test".to_string(),
            model: request.model.clone(),
            text,
            stop_reason: Some("stop".to_string()),
            provider: "scripted".to_string(),
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn invoker_with_settings(
    provider: Arc<ScriptedProvider>,
    settings: InvokerSettings,
) -> LlmInvoker {
    let metrics = Arc::new(AnalysisMetrics::new().unwrap());
    LlmInvoker::new(provider, settings, metrics)
}

pub fn invoker_with(provider: Arc<ScriptedProvider>) -> LlmInvoker {
    invoker_with_settings(provider, InvokerSettings::default())
}

pub fn service_with(provider: Arc<ScriptedProvider>) -> AnalysisService {
    AnalysisService::new(invoker_with(provider))
}
