use serde::{Deserialize, Serialize};

use crate::constants::{FAILURE_STATUS, SUCCESS_STATUS};

// ============ Address Models ============

/// A customer-supplied service address plus its qualification overlay.
///
/// Pipeline stages never mutate an address they did not build: every stage
/// hands back a fresh value derived from its input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAddress {
    // Line-based fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code_plus4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_desc: Option<Vec<String>>,

    // Street-level fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_num: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub street_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apt_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub po_box_no: Option<String>,

    // Result overlay
    #[serde(default)]
    pub qualified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_msg: Option<String>,

    // Qualification enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_location_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub fuze_site_id: i32,
    #[serde(default)]
    pub sector: i32,
    #[serde(default, rename = "availableCapacityCBand")]
    pub available_capacity_cband: i32,
    #[serde(default, rename = "availableCapacity4GHome")]
    pub available_capacity_4g_home: i32,
    #[serde(default, rename = "qualifiedCBand")]
    pub qualified_cband: bool,
    #[serde(default, rename = "qualified4GHome")]
    pub qualified_4g_home: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bundle_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<String>,
    #[serde(default, rename = "wifiBackupCbandqualified")]
    pub wifi_backup_cband_qualified: bool,
    #[serde(default)]
    pub wifi_backup_lte_qualified: bool,
    #[serde(default, rename = "vhiLiteQualified")]
    pub vhi_lite_qualified: bool,
    #[serde(default, rename = "cbandBYODLine")]
    pub cband_byod_line: bool,
    #[serde(default)]
    pub floor_plan_avl: bool,
}

impl CustomerAddress {
    /// Copies the address identity, parsed components and status overlay.
    ///
    /// Enrichment fields are deliberately left at their defaults so nothing
    /// from an earlier qualification bleeds into the copy.
    pub fn create_copy(&self) -> CustomerAddress {
        CustomerAddress {
            address_line1: self.address_line1.clone(),
            address_line2: self.address_line2.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            zip_code_plus4: self.zip_code_plus4.clone(),
            country: self.country.clone(),
            address_type: self.address_type.clone(),
            address_desc: self.address_desc.clone(),
            street_num: self.street_num.clone(),
            street_name: self.street_name.clone(),
            street_type: self.street_type.clone(),
            dir: self.dir.clone(),
            apt_number: self.apt_number.clone(),
            po_box_no: self.po_box_no.clone(),
            qualified: self.qualified,
            status_msg: self.status_msg.clone(),
            ..CustomerAddress::default()
        }
    }

    /// Copy marked unqualified with the given status.
    pub fn failed_copy(&self, status: impl Into<String>) -> CustomerAddress {
        CustomerAddress {
            qualified: false,
            status_msg: Some(status.into()),
            ..self.create_copy()
        }
    }

    /// True when both addresses carry the same addressLine1 and zipCode.
    pub fn same_identity(&self, other: &CustomerAddress) -> bool {
        self.address_line1 == other.address_line1 && self.zip_code == other.zip_code
    }

    pub fn status_starts_with(&self, prefix: &str) -> bool {
        self.status_msg
            .as_deref()
            .map(|msg| msg.starts_with(prefix))
            .unwrap_or(false)
    }
}

/// Returns the value when it is present and non-empty.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// ============ API Models ============

/// Body of `POST /api/v1/coverage/check`.
///
/// Entries are optional so that a JSON `null` inside the list is reported as
/// an invalid address instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiveGCoverageCheckRequest {
    #[serde(default)]
    pub customer_address: Option<Vec<Option<CustomerAddress>>>,
}

impl FiveGCoverageCheckRequest {
    pub fn new(addresses: Vec<CustomerAddress>) -> Self {
        Self {
            customer_address: Some(addresses.into_iter().map(Some).collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

/// Result of a coverage check. Always delivered to the caller; success or
/// failure is carried by `status_code`, `errors` and the per-address status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageCheckResponse {
    pub status_code: i32,
    pub customer_addresses: Vec<CustomerAddress>,
    pub errors: Vec<ErrorDetail>,
    pub bypass_address_validation: bool,
}

impl CoverageCheckResponse {
    pub fn success(customer_addresses: Vec<CustomerAddress>) -> Self {
        Self {
            status_code: SUCCESS_STATUS,
            customer_addresses,
            errors: Vec::new(),
            bypass_address_validation: false,
        }
    }

    /// Delivered response where the batch as a whole could not be qualified.
    pub fn degraded(customer_addresses: Vec<CustomerAddress>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![ErrorDetail {
                message: message.into(),
            }],
            ..Self::success(customer_addresses)
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status_code: FAILURE_STATUS,
            customer_addresses: Vec::new(),
            errors: vec![ErrorDetail {
                message: message.into(),
            }],
            bypass_address_validation: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == SUCCESS_STATUS
    }
}
