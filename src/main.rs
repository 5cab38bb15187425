// Mindit - OCD elicitation counseling backend
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use mindit::analysis::{AnalysisService, InvokerSettings, LlmInvoker};
use mindit::config::load_config;
use mindit::logging::init_tracing;
use mindit::metrics::AnalysisMetrics;
use mindit::providers::{LlmProvider, OpenAIProvider};
use mindit::server::AnalysisServer;

/// Counseling chatbot API that guides users through six analysis stages
#[derive(Parser, Debug)]
#[command(name = "mindit", version)]
struct Cli {
    /// Path to a TOML config file (default: ~/.mindit/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address (e.g. 0.0.0.0:8000)
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
        config.validate()?;
    }

    // Initialize tracing
    init_tracing(&config.log_level);

    if !config.llm.has_api_key() {
        tracing::warn!("No OpenAI API key configured; every stage will answer with its fallback");
    }

    let provider: Arc<dyn LlmProvider> = Arc::new(
        OpenAIProvider::from_config(&config.llm).context("Failed to create LLM provider")?,
    );
    tracing::info!(
        provider = provider.name(),
        model = %config.llm.model,
        "LLM provider ready"
    );

    let metrics = Arc::new(AnalysisMetrics::new()?);
    let invoker = LlmInvoker::new(provider, InvokerSettings::from(&config.llm), metrics);
    let service = AnalysisService::new(invoker);

    AnalysisServer::new(config.project_name.clone(), config.server.clone(), service)
        .serve()
        .await
}
