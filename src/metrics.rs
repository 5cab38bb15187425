// Prometheus metrics for the analysis pipeline
//
// Each service owns its own registry so tests can assert on counts
// without touching process-global state.

use anyhow::{Context, Result};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

pub struct AnalysisMetrics {
    registry: Registry,
    fallbacks: IntCounterVec,
    categories: IntCounterVec,
    llm_duration: HistogramVec,
}

impl AnalysisMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let fallbacks = IntCounterVec::new(
            Opts::new(
                "mindit_fallbacks_total",
                "Stage responses replaced by their fixed fallback",
            ),
            &["stage", "reason"],
        )
        .context("Failed to create fallback counter")?;

        let categories = IntCounterVec::new(
            Opts::new("mindit_categories_total", "Categorizer results by category"),
            &["category"],
        )
        .context("Failed to create category counter")?;

        let llm_duration = HistogramVec::new(
            HistogramOpts::new(
                "mindit_llm_request_duration_seconds",
                "Latency of completion calls",
            )
            .buckets(vec![0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]),
            &["outcome"],
        )
        .context("Failed to create LLM latency histogram")?;

        registry.register(Box::new(fallbacks.clone()))?;
        registry.register(Box::new(categories.clone()))?;
        registry.register(Box::new(llm_duration.clone()))?;

        Ok(Self {
            registry,
            fallbacks,
            categories,
            llm_duration,
        })
    }

    pub fn record_fallback(&self, stage: &str, reason: &str) {
        self.fallbacks.with_label_values(&[stage, reason]).inc();
    }

    pub fn record_category(&self, category: &str) {
        self.categories.with_label_values(&[category]).inc();
    }

    pub fn observe_llm_call(&self, outcome: &str, seconds: f64) {
        self.llm_duration
            .with_label_values(&[outcome])
            .observe(seconds);
    }

    pub fn fallback_count(&self, stage: &str, reason: &str) -> u64 {
        self.fallbacks.with_label_values(&[stage, reason]).get()
    }

    pub fn category_count(&self, category: &str) -> u64 {
        self.categories.with_label_values(&[category]).get()
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics output was not UTF-8")
    }
}
