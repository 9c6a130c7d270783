use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rust_5g_coverage_api::config::Config;
use rust_5g_coverage_api::coverage::CoveragePipeline;
use rust_5g_coverage_api::handlers::{self, AppState};
use rust_5g_coverage_api::request_builder::AddressRequestBuilder;
use rust_5g_coverage_api::services::SpectrumAdapterClient;

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - The spectrum adapter client and coverage pipeline.
/// - HTTP routes and middleware (CORS, Rate Limiting, Body Limit).
///
/// It then starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_5g_coverage_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let adapter = SpectrumAdapterClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize spectrum adapter client: {}", e))?;
    tracing::info!(
        "✓ Spectrum adapter client initialized: {}",
        config.spectrum_adapter_base_url
    );

    let pipeline = CoveragePipeline::new(
        Arc::new(adapter),
        AddressRequestBuilder::new(
            config.split_address_client_id.clone(),
            config.split_address_traffic.clone(),
        ),
    );

    let app_state = Arc::new(AppState {
        config: config.clone(),
        pipeline,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?,
    );

    let protected_routes = Router::new()
        .route(
            "/api/v1/coverage/check",
            post(handlers::check_5g_coverage),
        )
        .layer(
            ServiceBuilder::new()
                // Address batches are small; 1MB is generous
                .layer(RequestBodyLimitLayer::new(1024 * 1024))
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Health check bypasses rate limiting
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
