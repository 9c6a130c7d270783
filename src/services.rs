use crate::adapter_models::{
    QualificationRequest, QualificationResponse, SplitAddressRequest, SplitAddressResponse,
};
use crate::circuit_breaker::{create_adapter_circuit_breaker, AdapterCircuitBreaker};
use crate::config::Config;
use crate::constants::{QUALIFICATION_PATH, SPLIT_ADDRESS_PATH};
use crate::errors::AppError;
use async_trait::async_trait;
use failsafe::futures::CircuitBreaker;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Remote calls the coverage pipeline depends on.
///
/// `Ok(None)` means the service answered with an empty (`null`) body.
#[async_trait]
pub trait CoverageAdapter: Send + Sync {
    async fn split_address(
        &self,
        request: &SplitAddressRequest,
    ) -> Result<Option<SplitAddressResponse>, AppError>;

    async fn check_address_qualification(
        &self,
        request: &QualificationRequest,
    ) -> Result<Option<QualificationResponse>, AppError>;
}

/// HTTP client for the spectrum adapter, which fronts both the address
/// splitting and the bulk qualification services.
pub struct SpectrumAdapterClient {
    client: Client,
    base_url: String,
    split_breaker: AdapterCircuitBreaker,
    qualification_breaker: AdapterCircuitBreaker,
}

impl SpectrumAdapterClient {
    /// Creates a new `SpectrumAdapterClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the adapter, without trailing path.
    /// * `timeout` - Per-request timeout applied by reqwest.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AppError::ExternalApiError(format!("Failed to create adapter client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            split_breaker: create_adapter_circuit_breaker(),
            qualification_breaker: create_adapter_circuit_breaker(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config.spectrum_adapter_base_url.clone(),
            Duration::from_secs(config.adapter_timeout_secs),
        )
    }

    async fn post_json<Req, Resp>(
        &self,
        path: &str,
        service: &str,
        body: &Req,
    ) -> Result<Option<Resp>, AppError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Calling {} service: {}", service, url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("{} request failed: {}", service, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("{} service returned {}: {}", service, status, error_text);
            return Err(AppError::ExternalApiError(format!(
                "{} service returned {}: {}",
                service, status, error_text
            )));
        }

        response.json::<Option<Resp>>().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse {} response: {}", service, e))
        })
    }
}

fn unwrap_breaker<T>(
    result: Result<T, failsafe::Error<AppError>>,
    service: &str,
) -> Result<T, AppError> {
    match result {
        Ok(value) => Ok(value),
        Err(failsafe::Error::Inner(e)) => Err(e),
        Err(failsafe::Error::Rejected) => {
            tracing::warn!("Circuit open, rejecting {} call", service);
            Err(AppError::CircuitOpen(format!(
                "{} service temporarily unavailable",
                service
            )))
        }
    }
}

#[async_trait]
impl CoverageAdapter for SpectrumAdapterClient {
    async fn split_address(
        &self,
        request: &SplitAddressRequest,
    ) -> Result<Option<SplitAddressResponse>, AppError> {
        let result = self
            .split_breaker
            .call(self.post_json(SPLIT_ADDRESS_PATH, "Split address", request))
            .await;
        unwrap_breaker(result, "Split address")
    }

    async fn check_address_qualification(
        &self,
        request: &QualificationRequest,
    ) -> Result<Option<QualificationResponse>, AppError> {
        tracing::info!(
            "Requesting qualification for {} address(es)",
            request.address_list.len()
        );
        let result = self
            .qualification_breaker
            .call(self.post_json(QUALIFICATION_PATH, "Qualification", request))
            .await;
        unwrap_breaker(result, "Qualification")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = SpectrumAdapterClient::new("https://example.com/", Duration::from_secs(5));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url, "https://example.com");
    }

    #[test]
    fn rejected_call_maps_to_circuit_open() {
        let result: Result<(), failsafe::Error<AppError>> = Err(failsafe::Error::Rejected);
        assert!(matches!(
            unwrap_breaker(result, "Split address"),
            Err(AppError::CircuitOpen(_))
        ));
    }

    #[test]
    fn inner_error_passes_through() {
        let result: Result<(), failsafe::Error<AppError>> = Err(failsafe::Error::Inner(
            AppError::ExternalApiError("timeout".to_string()),
        ));
        assert!(matches!(
            unwrap_breaker(result, "Qualification"),
            Err(AppError::ExternalApiError(msg)) if msg == "timeout"
        ));
    }
}
