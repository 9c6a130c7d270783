//! Runs a single coverage check from a JSON file and prints the result.
//!
//! Usage: `check_addresses <request.json>` where the file holds a
//! `{"customerAddress": [...]}` body, as accepted by the HTTP endpoint.

use anyhow::Context;
use std::sync::Arc;

use rust_5g_coverage_api::config::Config;
use rust_5g_coverage_api::coverage::CoveragePipeline;
use rust_5g_coverage_api::models::FiveGCoverageCheckRequest;
use rust_5g_coverage_api::request_builder::AddressRequestBuilder;
use rust_5g_coverage_api::services::SpectrumAdapterClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: check_addresses <request.json>")?;

    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {}", path))?;
    let request: FiveGCoverageCheckRequest =
        serde_json::from_str(&raw).with_context(|| format!("{} is not a coverage request", path))?;

    let config = Config::from_env()?;
    let adapter = SpectrumAdapterClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize spectrum adapter client: {}", e))?;
    let pipeline = CoveragePipeline::new(
        Arc::new(adapter),
        AddressRequestBuilder::new(
            config.split_address_client_id.clone(),
            config.split_address_traffic.clone(),
        ),
    );

    let response = pipeline.check_5g_coverage(request).await;

    println!("{}", serde_json::to_string_pretty(&response)?);

    let qualified = response
        .customer_addresses
        .iter()
        .filter(|a| a.qualified)
        .count();
    eprintln!(
        "=== {} of {} address(es) qualified (status {}) ===",
        qualified,
        response.customer_addresses.len(),
        response.status_code
    );

    Ok(())
}
