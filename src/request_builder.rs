//! Outbound request construction for the split-address and qualification calls.
//!
//! The qualification filter lives here as a single predicate. The request
//! builder and the response reconciler both enumerate [`valid_for_qualification`]
//! so record identifiers line up on both sides of the call.

use crate::adapter_models::{
    AddressLineBased, QualificationAddress, QualificationRequest, SplitAddressRequest,
};
use crate::constants::{DEFAULT_CLIENT_ID, DEFAULT_TRAFFIC, QUALIFICATION_REQUEST_TYPE};
use crate::errors::AppError;
use crate::models::{non_empty, CustomerAddress};

/// True when the address has both a non-empty addressLine1 and zipCode.
pub fn is_valid_for_qualification(address: &CustomerAddress) -> bool {
    non_empty(&address.address_line1).is_some() && non_empty(&address.zip_code).is_some()
}

/// The addresses eligible for qualification, in input order.
///
/// Position `i` in the returned list is sent with record identifier `i + 1`.
pub fn valid_for_qualification(addresses: &[CustomerAddress]) -> Vec<&CustomerAddress> {
    addresses
        .iter()
        .filter(|address| is_valid_for_qualification(address))
        .collect()
}

/// Record identifier for the zero-based position in the valid subset.
pub fn record_identifier(position: usize) -> String {
    (position + 1).to_string()
}

/// Input check for the top-level request: a missing or empty list, a null
/// entry, or any entry lacking addressLine1/zipCode makes the batch invalid.
pub fn has_invalid_address(addresses: Option<&[Option<CustomerAddress>]>) -> bool {
    match addresses {
        None => true,
        Some([]) => true,
        Some(list) => list.iter().any(|entry| match entry {
            None => true,
            Some(address) => !is_valid_for_qualification(address),
        }),
    }
}

/// Builds the payloads for both adapter calls.
#[derive(Debug, Clone)]
pub struct AddressRequestBuilder {
    client_app_name: String,
    traffic: String,
}

impl Default for AddressRequestBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT_ID, DEFAULT_TRAFFIC)
    }
}

impl AddressRequestBuilder {
    pub fn new(client_app_name: impl Into<String>, traffic: impl Into<String>) -> Self {
        Self {
            client_app_name: client_app_name.into(),
            traffic: traffic.into(),
        }
    }

    pub fn build_split_request(&self, address: &CustomerAddress) -> SplitAddressRequest {
        SplitAddressRequest {
            address_line_based: AddressLineBased {
                address_line1: address.address_line1.clone(),
                address_line2: address.address_line2.clone(),
                city: address.city.clone(),
                state: address.state.clone(),
                zip_code: address.zip_code.clone(),
            },
            client_app_name: self.client_app_name.clone(),
            strict_validation_required: false,
            traffic: self.traffic.clone(),
        }
    }

    /// Builds the bulk qualification request.
    ///
    /// Only addresses passing [`is_valid_for_qualification`] are sent; they get
    /// sequential identifiers "1".."N" in filtered order, so skipped entries
    /// never leave gaps.
    pub fn build_qualification_request(
        &self,
        addresses: &[CustomerAddress],
    ) -> Result<QualificationRequest, AppError> {
        if addresses.is_empty() {
            tracing::error!("Customer addresses list is empty");
            return Err(AppError::InvalidArgument(
                "Customer addresses list cannot be null or empty".to_string(),
            ));
        }

        let address_list: Vec<QualificationAddress> = valid_for_qualification(addresses)
            .into_iter()
            .enumerate()
            .map(|(position, address)| QualificationAddress {
                record_identifier: record_identifier(position),
                address_line1: address.address_line1.clone().unwrap_or_default(),
                address_line2: address.address_line2.clone().unwrap_or_default(),
                city: address.city.clone().unwrap_or_default(),
                state: address.state.clone().unwrap_or_default(),
                zip: address.zip_code.clone().unwrap_or_default(),
            })
            .collect();

        let skipped = addresses.len() - address_list.len();
        if skipped > 0 {
            tracing::warn!(
                "Skipping {} address(es) missing addressLine1 or zipCode",
                skipped
            );
        }

        if address_list.is_empty() {
            tracing::error!("No valid addresses found after validation");
            return Err(AppError::NoValidAddresses(
                "No valid addresses available for qualification check".to_string(),
            ));
        }

        tracing::debug!(
            "Built qualification request with {} valid addresses",
            address_list.len()
        );

        Ok(QualificationRequest {
            include_cband: true,
            request_type: QUALIFICATION_REQUEST_TYPE.to_string(),
            address_list,
        })
    }
}
