//! Joins bulk qualification records back onto the addresses that were sent.
//!
//! Records are matched by record identifier, never by position: the
//! qualification service may reorder, drop or duplicate entries.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::adapter_models::{
    AddressInfo, AvailableCapacityInfo, BundleInfo, Eligibilities, PriorQualification,
    QualificationRecord,
};
use crate::constants::{
    ERROR_ADDRESS_SKIPPED, ERROR_NO_QUALIFICATION_FOR_ADDRESS, STATUS_MSG_NOT_QUALIFIED,
    STATUS_MSG_QUALIFIED, SUCCESS_RETURN_CODE,
};
use crate::models::{non_empty, CustomerAddress};
use crate::request_builder::{record_identifier, valid_for_qualification};

/// Parses a string-encoded upstream value, falling back on absence or
/// parse failure. Failures are logged, never returned.
pub fn parse_with_default<T>(raw: Option<&str>, field: &str, fallback: T) -> T
where
    T: FromStr + Display,
{
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return fallback;
    };

    match value.parse::<T>() {
        Ok(parsed) => parsed,
        Err(_) => {
            tracing::warn!(
                "Unable to parse {} value '{}', using default: {}",
                field,
                value,
                fallback
            );
            fallback
        }
    }
}

/// Like [`parse_with_default`] for floats, but "NaN" and "inf" count as
/// garbage: a non-finite value would serialize as `null`.
pub fn parse_finite(raw: Option<&str>, field: &str, fallback: f64) -> f64 {
    let parsed = parse_with_default(raw, field, fallback);
    if parsed.is_finite() {
        return parsed;
    }

    tracing::warn!(
        "Non-finite {} value '{}', using default: {}",
        field,
        raw.unwrap_or_default(),
        fallback
    );
    fallback
}

/// Capacity figures arrive as decimals ("15.0") but are reported as whole numbers.
fn parse_capacity(raw: Option<&str>, field: &str) -> i32 {
    parse_finite(raw, field, 0.0) as i32
}

/// Index of records by identifier. The first occurrence of a duplicate wins.
pub fn build_qualification_map(
    records: &[Option<QualificationRecord>],
) -> HashMap<&str, &QualificationRecord> {
    let mut map: HashMap<&str, &QualificationRecord> = HashMap::with_capacity(records.len());

    for record in records.iter().flatten() {
        let Some(id) = record.record_identifier.as_deref() else {
            continue;
        };
        if map.contains_key(id) {
            tracing::warn!(
                "Duplicate recordIdentifier found: {}, keeping first occurrence",
                id
            );
            continue;
        }
        map.insert(id, record);
    }

    map
}

/// Produces the final address list for a qualification response.
///
/// Addresses valid for qualification come first, in the order their record
/// identifiers were assigned; addresses that were never sent follow in input
/// order, marked as skipped.
pub fn reconcile(
    addresses: &[CustomerAddress],
    records: &[Option<QualificationRecord>],
) -> Vec<CustomerAddress> {
    let qualification_map = build_qualification_map(records);
    let valid = valid_for_qualification(addresses);

    let mut reconciled: Vec<CustomerAddress> = valid
        .iter()
        .enumerate()
        .map(|(position, address)| {
            let id = record_identifier(position);
            match qualification_map.get(id.as_str()) {
                Some(record) => enrich_address(address, record),
                None => {
                    tracing::warn!(
                        "No qualification record {} for address: {:?}",
                        id,
                        address.address_line1
                    );
                    address.failed_copy(ERROR_NO_QUALIFICATION_FOR_ADDRESS)
                }
            }
        })
        .collect();

    let skipped = addresses
        .iter()
        .filter(|original| !valid.iter().any(|sent| sent.same_identity(original)))
        .map(|original| original.failed_copy(ERROR_ADDRESS_SKIPPED));
    reconciled.extend(skipped);

    tracing::debug!(
        "Mapped {} addresses with qualification data",
        reconciled.len()
    );
    reconciled
}

/// Copy of `address` carrying everything the qualification record says about it.
pub fn enrich_address(address: &CustomerAddress, record: &QualificationRecord) -> CustomerAddress {
    let mut enriched = address.create_copy();

    let five_g_qualified = record.five_g_home_qualified.unwrap_or(false);
    enriched.qualified = five_g_qualified;
    enriched.status_msg = Some(status_message(record, five_g_qualified));

    apply_address_info(&mut enriched, record.address_info.as_ref());
    apply_capacity(&mut enriched, record.available_capacity_info.as_ref());

    enriched.qualified_cband = record.cband_qualified.unwrap_or(false);
    enriched.qualified_4g_home = record.lte_qualified.unwrap_or(false);

    apply_eligibilities(&mut enriched, record.eligibilities.as_ref());
    apply_prior_qualification(&mut enriched, record.prior_qualification.as_ref());

    // No upstream source for these.
    enriched.cband_byod_line = false;
    enriched.floor_plan_avl = false;

    enriched
}

fn status_message(record: &QualificationRecord, five_g_qualified: bool) -> String {
    let call_succeeded = record.return_code.as_deref() == Some(SUCCESS_RETURN_CODE);
    if call_succeeded && five_g_qualified {
        return STATUS_MSG_QUALIFIED.to_string();
    }

    non_empty(&record.return_message)
        .unwrap_or(STATUS_MSG_NOT_QUALIFIED)
        .to_string()
}

fn apply_address_info(enriched: &mut CustomerAddress, info: Option<&AddressInfo>) {
    let Some(info) = info else {
        tracing::debug!("AddressInfo is null, setting default values");
        enriched.fuze_site_id = 0;
        enriched.sector = 0;
        enriched.latitude = 0.0;
        enriched.longitude = 0.0;
        return;
    };

    enriched.address_id = info.address_id.clone();
    enriched.sub_location_id = non_empty(&info.location_id)
        .map(str::to_string)
        .or_else(|| info.base_location_id.clone());
    enriched.building_id = info.building_id.clone();
    enriched.floor = info.floor.clone();

    enriched.latitude = parse_finite(info.latitude.as_deref(), "latitude", 0.0);
    enriched.longitude = parse_finite(info.longitude.as_deref(), "longitude", 0.0);
    enriched.fuze_site_id = parse_with_default(info.fuze_site_id.as_deref(), "fuzeSiteId", 0);
    enriched.sector = parse_with_default(info.sector.as_deref(), "sector", 0);
}

fn apply_capacity(enriched: &mut CustomerAddress, capacity: Option<&AvailableCapacityInfo>) {
    let Some(capacity) = capacity else {
        enriched.available_capacity_cband = 0;
        enriched.available_capacity_4g_home = 0;
        return;
    };

    enriched.available_capacity_cband =
        parse_capacity(capacity.cband_capacity.as_deref(), "cbandCapacity");
    enriched.available_capacity_4g_home =
        parse_capacity(capacity.lte_capacity.as_deref(), "lteCapacity");
}

fn bundle_names(bundles: &Option<Vec<Option<BundleInfo>>>) -> impl Iterator<Item = String> + '_ {
    bundles
        .iter()
        .flatten()
        .flatten()
        .filter_map(|bundle| non_empty(&bundle.bundle_name).map(str::to_string))
}

fn apply_eligibilities(enriched: &mut CustomerAddress, eligibilities: Option<&Eligibilities>) {
    let Some(eligibilities) = eligibilities else {
        return;
    };

    enriched.bundle_list = bundle_names(&eligibilities.five_g_home_bundle)
        .chain(bundle_names(&eligibilities.cband_bundle))
        .collect();

    if let Some(speed) = non_empty(&eligibilities.available_speed_tier) {
        enriched.max_speed = Some(speed.to_string());
    }
}

fn apply_prior_qualification(enriched: &mut CustomerAddress, prior: Option<&PriorQualification>) {
    let prior = prior.cloned().unwrap_or_default();
    enriched.wifi_backup_cband_qualified = prior.wifi_backup_cband_qualified.unwrap_or(false);
    enriched.wifi_backup_lte_qualified = prior.wifi_backup_lte_qualified.unwrap_or(false);
    enriched.vhi_lite_qualified = prior.vhi_lite_qualified.unwrap_or(false);
}
