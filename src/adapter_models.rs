use serde::{Deserialize, Serialize};

// ============ Split Address ============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressLineBased {
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// Request sent to the address-splitting service for a single address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitAddressRequest {
    pub address_line_based: AddressLineBased,
    pub client_app_name: String,
    pub strict_validation_required: bool,
    pub traffic: String,
}

/// Response of the address-splitting service.
///
/// Only usable when every link from `data` down to `address` is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitAddressResponse {
    #[serde(default)]
    pub data: Option<SplitAddressData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitAddressData {
    #[serde(default)]
    pub address_split: Option<AddressSplit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSplit {
    #[serde(default)]
    pub response: Option<AddressSplitResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSplitResponse {
    #[serde(default)]
    pub address: Option<SplitAddress>,
}

/// Normalized address components returned by the splitting service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitAddress {
    #[serde(default)]
    pub street_num: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub apt_num: Option<String>,
    #[serde(default)]
    pub pobox: Option<String>,
    #[serde(default, rename = "type")]
    pub street_type: Option<String>,
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub zip_code4: Option<String>,
}

impl SplitAddressResponse {
    /// The leaf address, if the whole chain resolved.
    pub fn address(&self) -> Option<&SplitAddress> {
        self.data
            .as_ref()?
            .address_split
            .as_ref()?
            .response
            .as_ref()?
            .address
            .as_ref()
    }

    /// Convenience constructor for a fully populated response chain.
    pub fn with_address(address: SplitAddress) -> Self {
        Self {
            data: Some(SplitAddressData {
                address_split: Some(AddressSplit {
                    response: Some(AddressSplitResponse {
                        address: Some(address),
                    }),
                }),
            }),
        }
    }
}

// ============ Qualification ============

/// One address entry of a bulk qualification request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationAddress {
    pub record_identifier: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationRequest {
    #[serde(rename = "includeCBand")]
    pub include_cband: bool,
    pub request_type: String,
    pub address_list: Vec<QualificationAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationResponse {
    #[serde(default)]
    pub data: Option<QualificationData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationData {
    #[serde(default)]
    pub bulk_address_qualification_response: Option<Vec<Option<QualificationRecord>>>,
}

impl QualificationResponse {
    /// The record list when the response is structurally usable: data present
    /// and a non-empty list of records.
    pub fn records(&self) -> Option<&[Option<QualificationRecord>]> {
        self.data
            .as_ref()?
            .bulk_address_qualification_response
            .as_deref()
            .filter(|records| !records.is_empty())
    }

    pub fn with_records(records: Vec<QualificationRecord>) -> Self {
        Self {
            data: Some(QualificationData {
                bulk_address_qualification_response: Some(
                    records.into_iter().map(Some).collect(),
                ),
            }),
        }
    }
}

/// Per-address qualification result. Numeric values arrive as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationRecord {
    #[serde(default)]
    pub record_identifier: Option<String>,
    #[serde(default)]
    pub five_g_home_qualified: Option<bool>,
    #[serde(default)]
    pub return_code: Option<String>,
    #[serde(default)]
    pub return_message: Option<String>,
    #[serde(default, rename = "cBandQualified")]
    pub cband_qualified: Option<bool>,
    #[serde(default, rename = "lteQualified")]
    pub lte_qualified: Option<bool>,
    #[serde(default)]
    pub address_info: Option<AddressInfo>,
    #[serde(default)]
    pub available_capacity_info: Option<AvailableCapacityInfo>,
    #[serde(default)]
    pub eligibilities: Option<Eligibilities>,
    #[serde(default)]
    pub prior_qualification: Option<PriorQualification>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInfo {
    #[serde(default)]
    pub address_id: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub base_location_id: Option<String>,
    #[serde(default)]
    pub building_id: Option<String>,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub fuze_site_id: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableCapacityInfo {
    #[serde(default)]
    pub cband_capacity: Option<String>,
    #[serde(default)]
    pub lte_capacity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleInfo {
    #[serde(default)]
    pub bundle_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibilities {
    #[serde(default)]
    pub five_g_home_bundle: Option<Vec<Option<BundleInfo>>>,
    #[serde(default)]
    pub cband_bundle: Option<Vec<Option<BundleInfo>>>,
    #[serde(default)]
    pub available_speed_tier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorQualification {
    #[serde(default)]
    pub wifi_backup_cband_qualified: Option<bool>,
    #[serde(default)]
    pub wifi_backup_lte_qualified: Option<bool>,
    #[serde(default)]
    pub vhi_lite_qualified: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_response_resolves_full_chain() {
        let response: SplitAddressResponse = serde_json::from_value(json!({
            "data": {"addressSplit": {"response": {"address": {
                "streetNum": "123", "streetName": "MAIN", "type": "ST", "zipCode4": "0001"
            }}}}
        }))
        .unwrap();

        let address = response.address().unwrap();
        assert_eq!(address.street_num.as_deref(), Some("123"));
        assert_eq!(address.street_type.as_deref(), Some("ST"));
        assert_eq!(address.zip_code4.as_deref(), Some("0001"));
    }

    #[test]
    fn split_response_with_broken_chain_has_no_address() {
        let cases = [
            json!({}),
            json!({"data": null}),
            json!({"data": {"addressSplit": null}}),
            json!({"data": {"addressSplit": {"response": null}}}),
            json!({"data": {"addressSplit": {"response": {"address": null}}}}),
        ];

        for case in cases {
            let response: SplitAddressResponse = serde_json::from_value(case.clone()).unwrap();
            assert!(response.address().is_none(), "expected no address for {}", case);
        }
    }

    #[test]
    fn qualification_response_requires_non_empty_records() {
        let empty: QualificationResponse = serde_json::from_value(json!({
            "data": {"bulkAddressQualificationResponse": []}
        }))
        .unwrap();
        assert!(empty.records().is_none());

        let missing: QualificationResponse =
            serde_json::from_value(json!({"data": {}})).unwrap();
        assert!(missing.records().is_none());

        let no_data: QualificationResponse = serde_json::from_value(json!({})).unwrap();
        assert!(no_data.records().is_none());
    }

    #[test]
    fn qualification_record_reads_wire_names() {
        let record: QualificationRecord = serde_json::from_value(json!({
            "recordIdentifier": "1",
            "fiveGHomeQualified": true,
            "returnCode": "0",
            "cBandQualified": true,
            "lteQualified": null,
            "availableCapacityInfo": {"cbandCapacity": "15.0"},
            "eligibilities": {"fiveGHomeBundle": [{"bundleName": "Gen4"}, null]}
        }))
        .unwrap();

        assert_eq!(record.five_g_home_qualified, Some(true));
        assert_eq!(record.cband_qualified, Some(true));
        assert_eq!(record.lte_qualified, None);
        assert_eq!(
            record.available_capacity_info.unwrap().cband_capacity.as_deref(),
            Some("15.0")
        );
        assert_eq!(
            record.eligibilities.unwrap().five_g_home_bundle.unwrap().len(),
            2
        );
    }

    #[test]
    fn qualification_request_uses_wire_names() {
        let request = QualificationRequest {
            include_cband: true,
            request_type: "BULK".to_string(),
            address_list: vec![QualificationAddress {
                record_identifier: "1".to_string(),
                ..QualificationAddress::default()
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["includeCBand"], true);
        assert_eq!(json["requestType"], "BULK");
        assert_eq!(json["addressList"][0]["recordIdentifier"], "1");
        assert_eq!(json["addressList"][0]["addressLine2"], "");
    }
}
