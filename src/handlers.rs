use crate::config::Config;
use crate::coverage::CoveragePipeline;
use crate::models::{CoverageCheckResponse, FiveGCoverageCheckRequest};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Split + qualification pipeline backed by the spectrum adapter.
    pub pipeline: CoveragePipeline,
}

/// Health check endpoint.
///
/// Returns the service status and version, plus the adapter this instance
/// is wired to.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-5g-coverage-api",
            "version": env!("CARGO_PKG_VERSION"),
            "adapter": {
                "baseUrl": state.config.spectrum_adapter_base_url,
                "timeoutSecs": state.config.adapter_timeout_secs
            }
        })),
    )
}

/// POST /api/v1/coverage/check
///
/// Runs the 5G home internet coverage check for the submitted addresses.
/// Always answers 200; the body's `statusCode`, `errors` and per-address
/// `statusMsg` describe the outcome.
pub async fn check_5g_coverage(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FiveGCoverageCheckRequest>,
) -> (StatusCode, Json<CoverageCheckResponse>) {
    tracing::info!(
        "POST /coverage/check - {} address(es)",
        request
            .customer_address
            .as_ref()
            .map(|list| list.len())
            .unwrap_or(0)
    );

    let response = state.pipeline.check_5g_coverage(request).await;

    (StatusCode::OK, Json(response))
}
