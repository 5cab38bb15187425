// HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::analysis::{
    AnalysisService, CategoryAnalysisResponse, ChatRequest, ChatResponse, HistoryAnalysisRequest,
    ObsessionAnalysisRequest, ObsessionAnalysisResponse, PatternAnalysisResponse,
    TextAnalysisResponse,
};

/// Shared state handed to every handler
pub struct AppState {
    pub service: AnalysisService,
    pub project_name: String,
    pub api_prefix: String,
}

/// Create the router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let prefix = state.api_prefix.trim_end_matches('/').to_string();
    let obsession = |path: &str| format!("{prefix}/obsession/{path}");

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .route(&obsession("health"), get(obsession_health))
        .route(&obsession("analyze"), post(analyze))
        .route(&obsession("analyze2"), post(analyze2))
        .route(&obsession("analyze3"), post(analyze3))
        .route(&obsession("analyze4"), post(analyze4))
        .route(&obsession("analyze5"), post(analyze5))
        .route(&obsession("analyze6"), post(analyze6))
        .route(&format!("{prefix}/chat"), post(chat))
        .with_state(state)
}

async fn root(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "message": state.project_name,
        "version": env!("CARGO_PKG_VERSION"),
        "docs": state.api_prefix,
    }))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

async fn obsession_health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": "obsession-analysis" }))
}

/// Prometheus text exposition
pub async fn metrics_endpoint(State(state): State<Arc<AppState>>) -> Response {
    match state.service.metrics().render() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ObsessionAnalysisRequest>,
) -> Json<ObsessionAnalysisResponse> {
    Json(state.service.analyze1(request).await)
}

async fn analyze2(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HistoryAnalysisRequest>,
) -> Json<TextAnalysisResponse> {
    Json(state.service.analyze2(request).await)
}

async fn analyze3(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HistoryAnalysisRequest>,
) -> Json<PatternAnalysisResponse> {
    Json(state.service.analyze3(request).await)
}

async fn analyze4(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HistoryAnalysisRequest>,
) -> Json<CategoryAnalysisResponse> {
    Json(state.service.analyze4(request).await)
}

async fn analyze5(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HistoryAnalysisRequest>,
) -> Json<TextAnalysisResponse> {
    Json(state.service.analyze5(request).await)
}

async fn analyze6(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HistoryAnalysisRequest>,
) -> Json<TextAnalysisResponse> {
    Json(state.service.analyze6(request).await)
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    Json(state.service.chat(request).await)
}
