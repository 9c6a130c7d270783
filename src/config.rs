use crate::constants::{DEFAULT_CLIENT_ID, DEFAULT_TRAFFIC};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub spectrum_adapter_base_url: String,
    pub split_address_client_id: String,
    pub split_address_traffic: String,
    pub adapter_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            spectrum_adapter_base_url: std::env::var("SPECTRUM_ADAPTER_BASE_URL")
                .map_err(|_| {
                    anyhow::anyhow!("SPECTRUM_ADAPTER_BASE_URL environment variable required")
                })
                .and_then(|url| validate_base_url("SPECTRUM_ADAPTER_BASE_URL", url))?,
            split_address_client_id: std::env::var("SPLIT_ADDRESS_CLIENT_ID")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
            split_address_traffic: std::env::var("SPLIT_ADDRESS_TRAFFIC")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TRAFFIC.to_string()),
            adapter_timeout_secs: std::env::var("ADAPTER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("ADAPTER_TIMEOUT_SECS must be a positive number"))
                .and_then(|secs| {
                    if secs == 0 {
                        anyhow::bail!("ADAPTER_TIMEOUT_SECS must be greater than zero");
                    }
                    Ok(secs)
                })?,
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Spectrum adapter base URL: {}",
            config.spectrum_adapter_base_url
        );
        tracing::debug!(
            "Split address client: {} (traffic {})",
            config.split_address_client_id,
            config.split_address_traffic
        );
        tracing::debug!("Adapter timeout: {}s", config.adapter_timeout_secs);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

fn validate_base_url(name: &str, raw: String) -> anyhow::Result<String> {
    if raw.trim().is_empty() {
        anyhow::bail!("{} cannot be empty", name);
    }
    let parsed = url::Url::parse(raw.trim())
        .map_err(|e| anyhow::anyhow!("{} is not a valid URL: {}", name, e))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("{} must start with http:// or https://", name);
    }
    Ok(raw.trim().trim_end_matches('/').to_string())
}
