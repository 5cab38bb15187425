// Mindit - Analysis Server Module
// HTTP surface over the obsession analysis pipeline

mod handlers;
mod middleware;

pub use handlers::{create_router, health_check, metrics_endpoint, AppState};
pub use middleware::{cors_layer, handle_panic, INTERNAL_ERROR_DETAIL};

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::analysis::AnalysisService;
use crate::config::constants::MAX_BODY_BYTES;
use crate::config::ServerConfig;

/// HTTP server for the analysis endpoints
pub struct AnalysisServer {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl AnalysisServer {
    pub fn new(project_name: impl Into<String>, config: ServerConfig, service: AnalysisService) -> Self {
        let state = Arc::new(AppState {
            service,
            project_name: project_name.into(),
            api_prefix: config.api_prefix.clone(),
        });
        Self { state, config }
    }

    /// Router with every layer applied, ready to serve or to drive in tests
    pub fn app(&self) -> axum::Router {
        create_router(Arc::clone(&self.state)).layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&self.config.cors_allow_origins))
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
    }

    /// Start the HTTP server
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.config.bind_address))?;

        let app = self.app();

        tracing::info!(
            "Starting {} on {} (prefix {})",
            self.state.project_name,
            addr,
            self.config.api_prefix
        );

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
