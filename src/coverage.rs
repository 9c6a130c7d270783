//! 5G home internet coverage check.
//!
//! Two remote stages run per batch:
//! 1. Split every address concurrently through the address-splitting service
//! 2. Gate on the split results
//! 3. Qualify the surviving addresses with one bulk call
//! 4. Reconcile qualification records back onto the addresses
//!
//! Per-address failures become status messages on that address. Only
//! malformed input produces a failure response, and `check_5g_coverage`
//! always returns a response.
use std::sync::Arc;

use futures::future::join_all;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::Instrument;
use uuid::Uuid;

use crate::adapter_models::{SplitAddress, SplitAddressResponse};
use crate::constants::{
    ERROR_5G_COVERAGE_CHECK_FAILED, ERROR_ALL_ADDRESSES_FAILED_SPLIT, ERROR_INVALID_ADDRESS,
    ERROR_NO_QUALIFICATION_DATA, ERROR_SPLIT_ADDRESS_FAILED, ERROR_SPLIT_ADDRESS_SERVICE,
    SPLIT_FAILURE_PREFIX, STATUS_MSG_ADDRESS_VALIDATED,
};
use crate::errors::AppError;
use crate::models::{non_empty, CoverageCheckResponse, CustomerAddress, FiveGCoverageCheckRequest};
use crate::reconciler;
use crate::request_builder::{has_invalid_address, valid_for_qualification, AddressRequestBuilder};
use crate::services::CoverageAdapter;

static REPEATED_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

/// Outcome of the batch gate.
#[derive(Debug, PartialEq)]
pub enum GateDecision {
    /// At least one address survived splitting; qualify the whole list.
    Proceed(Vec<CustomerAddress>),
    /// Every address failed splitting; answer without qualifying.
    ShortCircuit(Vec<CustomerAddress>),
}

/// Decides whether the split results go on to qualification.
pub fn evaluate_batch(split_results: Vec<CustomerAddress>) -> Result<GateDecision, AppError> {
    if split_results.is_empty() {
        tracing::error!("No addresses available after split validation");
        return Err(AppError::AllAddressesFailedSplit(
            ERROR_ALL_ADDRESSES_FAILED_SPLIT.to_string(),
        ));
    }

    let all_failed = split_results
        .iter()
        .all(|address| address.status_starts_with(SPLIT_FAILURE_PREFIX));

    if all_failed {
        tracing::warn!(
            "All {} addresses failed split address validation, skipping qualification call",
            split_results.len()
        );
        return Ok(GateDecision::ShortCircuit(split_results));
    }

    tracing::debug!(
        "Proceeding to qualification with {} validated addresses",
        split_results.len()
    );
    Ok(GateDecision::Proceed(split_results))
}

/// Rebuilds addressLine1 from street number, name and type.
pub fn build_address_line1(address: &SplitAddress) -> String {
    let joined = [&address.street_num, &address.street_name, &address.street_type]
        .into_iter()
        .filter_map(non_empty)
        .collect::<Vec<_>>()
        .join(" ");

    REPEATED_WHITESPACE
        .replace_all(joined.trim(), " ")
        .into_owned()
}

/// Normalized address built from the split service's components.
pub fn address_from_split(original: &CustomerAddress, split: &SplitAddress) -> CustomerAddress {
    CustomerAddress {
        address_type: original.address_type.clone(),
        country: original.country.clone(),
        address_desc: original.address_desc.clone(),

        street_num: split.street_num.clone(),
        street_name: split.street_name.clone(),
        apt_number: split.apt_num.clone(),
        po_box_no: split.pobox.clone(),
        street_type: split.street_type.clone(),
        dir: split.dir.clone(),

        address_line1: Some(build_address_line1(split)),
        address_line2: non_empty(&split.apt_num)
            .map(str::to_string)
            .or_else(|| original.address_line2.clone()),

        city: split.city.clone(),
        state: split.state.clone(),
        zip_code: split.zip_code.clone(),
        zip_code_plus4: split.zip_code4.clone(),

        qualified: false,
        status_msg: Some(STATUS_MSG_ADDRESS_VALIDATED.to_string()),
        ..CustomerAddress::default()
    }
}

/// Classifies one split-service outcome.
///
/// The error arm is itself a usable address (a failure-marked copy), so the
/// caller can always keep going.
pub fn classify_split(
    original: &CustomerAddress,
    outcome: Result<Option<SplitAddressResponse>, AppError>,
) -> Result<CustomerAddress, CustomerAddress> {
    match outcome {
        Ok(response) => match response.as_ref().and_then(SplitAddressResponse::address) {
            Some(split) => {
                tracing::debug!(
                    "Address validated successfully for: {:?}",
                    original.address_line1
                );
                Ok(address_from_split(original, split))
            }
            None => {
                tracing::warn!(
                    "Split address response is invalid or incomplete for: {:?}",
                    original.address_line1
                );
                Err(original.failed_copy(ERROR_SPLIT_ADDRESS_FAILED))
            }
        },
        Err(e) => {
            tracing::error!(
                "Error occurred from split address service for address: {:?}. Error: {}",
                original.address_line1,
                e
            );
            Err(original.failed_copy(format!("{}{}", ERROR_SPLIT_ADDRESS_SERVICE, e.message())))
        }
    }
}

/// Runs both remote stages for one batch of addresses.
#[derive(Clone)]
pub struct CoveragePipeline {
    adapter: Arc<dyn CoverageAdapter>,
    builder: AddressRequestBuilder,
}

impl CoveragePipeline {
    pub fn new(adapter: Arc<dyn CoverageAdapter>, builder: AddressRequestBuilder) -> Self {
        Self { adapter, builder }
    }

    /// Top-level entry point. Never fails: every outcome is a response.
    pub async fn check_5g_coverage(
        &self,
        request: FiveGCoverageCheckRequest,
    ) -> CoverageCheckResponse {
        let batch_id = Uuid::new_v4();
        let span = tracing::info_span!("coverage_check", %batch_id);

        async move {
            let addresses = request.customer_address;
            if has_invalid_address(addresses.as_deref()) {
                tracing::error!("Customer addresses are invalid. Returning error response.");
                return CoverageCheckResponse::failure(ERROR_INVALID_ADDRESS);
            }
            let addresses: Vec<CustomerAddress> =
                addresses.into_iter().flatten().flatten().collect();
            tracing::info!("Checking 5G coverage for {} address(es)", addresses.len());

            let split_results = self.split_addresses(&addresses).await;

            let response = match evaluate_batch(split_results) {
                Err(e) => {
                    tracing::error!("Failed to process 5G coverage check: {}", e);
                    CoverageCheckResponse::failure(e.message())
                }
                Ok(GateDecision::ShortCircuit(failed)) => CoverageCheckResponse::success(failed),
                Ok(GateDecision::Proceed(validated)) => self.qualify(validated).await,
            };

            tracing::info!(
                "Coverage check finished: status {}, {} address(es), {} qualified",
                response.status_code,
                response.customer_addresses.len(),
                response
                    .customer_addresses
                    .iter()
                    .filter(|a| a.qualified)
                    .count()
            );
            response
        }
        .instrument(span)
        .await
    }

    /// Splits every address concurrently and waits for all of them.
    ///
    /// Output order matches input order.
    pub async fn split_addresses(&self, addresses: &[CustomerAddress]) -> Vec<CustomerAddress> {
        let tasks = addresses.iter().map(|address| self.split_one(address));

        join_all(tasks)
            .await
            .into_iter()
            .map(|result| match result {
                Ok(validated) => validated,
                Err(failed) => failed,
            })
            .collect()
    }

    async fn split_one(
        &self,
        address: &CustomerAddress,
    ) -> Result<CustomerAddress, CustomerAddress> {
        let request = self.builder.build_split_request(address);
        let outcome = self.adapter.split_address(&request).await;
        classify_split(address, outcome)
    }

    /// Qualifies the validated addresses with a single bulk call.
    ///
    /// Total failures mark every address in `addresses`, not only the ones
    /// that would have been sent.
    pub async fn qualify(&self, addresses: Vec<CustomerAddress>) -> CoverageCheckResponse {
        if valid_for_qualification(&addresses).is_empty() {
            tracing::warn!("No valid addresses available for qualification after filtering");
            return failure_for_all(&addresses, ERROR_NO_QUALIFICATION_DATA);
        }

        let request = match self.builder.build_qualification_request(&addresses) {
            Ok(request) => request,
            Err(e) => return qualification_error(&addresses, e),
        };

        let response = match self.adapter.check_address_qualification(&request).await {
            Ok(response) => response,
            Err(e) => return qualification_error(&addresses, e),
        };

        match response.as_ref().and_then(|r| r.records()) {
            Some(records) => {
                CoverageCheckResponse::success(reconciler::reconcile(&addresses, records))
            }
            None => {
                tracing::warn!("Qualification response is null or empty");
                failure_for_all(&addresses, ERROR_NO_QUALIFICATION_DATA)
            }
        }
    }
}

fn qualification_error(addresses: &[CustomerAddress], error: AppError) -> CoverageCheckResponse {
    tracing::error!("Error calling qualification service: {}", error);
    failure_for_all(
        addresses,
        format!("{}{}", ERROR_5G_COVERAGE_CHECK_FAILED, error.message()),
    )
}

fn failure_for_all(
    addresses: &[CustomerAddress],
    message: impl Into<String>,
) -> CoverageCheckResponse {
    let message = message.into();
    let failed = addresses
        .iter()
        .map(|address| address.failed_copy(message.clone()))
        .collect();
    CoverageCheckResponse::degraded(failed, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(num: Option<&str>, name: Option<&str>, kind: Option<&str>) -> SplitAddress {
        SplitAddress {
            street_num: num.map(str::to_string),
            street_name: name.map(str::to_string),
            street_type: kind.map(str::to_string),
            ..SplitAddress::default()
        }
    }

    fn original() -> CustomerAddress {
        CustomerAddress {
            address_line1: Some("123 main street".to_string()),
            address_line2: Some("UNIT 9".to_string()),
            zip_code: Some("12207".to_string()),
            country: Some("USA".to_string()),
            address_type: Some("SERVICE".to_string()),
            ..CustomerAddress::default()
        }
    }

    #[test]
    fn address_line1_joins_and_collapses_whitespace() {
        assert_eq!(
            build_address_line1(&split(Some("123"), Some("MAIN"), Some("ST"))),
            "123 MAIN ST"
        );
        assert_eq!(
            build_address_line1(&split(Some(" 123 "), Some("NORTH   MAIN"), None)),
            "123 NORTH MAIN"
        );
        assert_eq!(build_address_line1(&split(None, Some(""), Some("ST"))), "ST");
        assert_eq!(build_address_line1(&split(None, None, None)), "");
    }

    #[test]
    fn address_from_split_prefers_apartment_for_line2() {
        let mut components = split(Some("123"), Some("MAIN"), Some("ST"));
        components.apt_num = Some("4B".to_string());
        components.zip_code = Some("12207".to_string());
        components.zip_code4 = Some("0001".to_string());

        let validated = address_from_split(&original(), &components);

        assert_eq!(validated.address_line1.as_deref(), Some("123 MAIN ST"));
        assert_eq!(validated.address_line2.as_deref(), Some("4B"));
        assert_eq!(validated.apt_number.as_deref(), Some("4B"));
        assert_eq!(validated.zip_code_plus4.as_deref(), Some("0001"));
        assert_eq!(validated.country.as_deref(), Some("USA"));
        assert!(!validated.qualified);
        assert_eq!(
            validated.status_msg.as_deref(),
            Some(STATUS_MSG_ADDRESS_VALIDATED)
        );

        components.apt_num = None;
        let validated = address_from_split(&original(), &components);
        assert_eq!(validated.address_line2.as_deref(), Some("UNIT 9"));
    }

    #[test]
    fn classify_split_broken_chain_is_failure() {
        let result = classify_split(&original(), Ok(Some(SplitAddressResponse::default())));
        let failed = result.unwrap_err();
        assert!(!failed.qualified);
        assert_eq!(failed.status_msg.as_deref(), Some(ERROR_SPLIT_ADDRESS_FAILED));
        assert_eq!(failed.address_line1, original().address_line1);

        let result = classify_split(&original(), Ok(None));
        assert_eq!(
            result.unwrap_err().status_msg.as_deref(),
            Some(ERROR_SPLIT_ADDRESS_FAILED)
        );
    }

    #[test]
    fn classify_split_transport_error_embeds_message() {
        let result = classify_split(
            &original(),
            Err(AppError::ExternalApiError("connection reset".to_string())),
        );
        let failed = result.unwrap_err();
        assert_eq!(
            failed.status_msg.as_deref(),
            Some("Address validation failed: connection reset")
        );
    }

    #[test]
    fn gate_rejects_empty_list() {
        assert!(matches!(
            evaluate_batch(Vec::new()),
            Err(AppError::AllAddressesFailedSplit(_))
        ));
    }

    #[test]
    fn gate_short_circuits_when_all_failed() {
        let failed = vec![
            original().failed_copy(ERROR_SPLIT_ADDRESS_FAILED),
            original().failed_copy(format!("{}timeout", ERROR_SPLIT_ADDRESS_SERVICE)),
        ];
        assert!(matches!(
            evaluate_batch(failed),
            Ok(GateDecision::ShortCircuit(list)) if list.len() == 2
        ));
    }

    #[test]
    fn gate_proceeds_with_mixed_results() {
        let mixed = vec![
            original().failed_copy(ERROR_SPLIT_ADDRESS_FAILED),
            CustomerAddress {
                status_msg: Some(STATUS_MSG_ADDRESS_VALIDATED.to_string()),
                ..original()
            },
        ];
        assert!(matches!(
            evaluate_batch(mixed),
            Ok(GateDecision::Proceed(list)) if list.len() == 2
        ));
    }
}
