//! Fixed values shared by the request builder, the pipeline and the adapter client.

// ============ Adapter endpoints ============

pub const SPLIT_ADDRESS_PATH: &str = "/splitAddress";
pub const QUALIFICATION_PATH: &str = "/nautilus/qualification";

pub const DEFAULT_CLIENT_ID: &str = "ATG-RTL-NETACM";
pub const DEFAULT_TRAFFIC: &str = "LIVE";
pub const QUALIFICATION_REQUEST_TYPE: &str = "BULK";

// ============ Status codes ============

pub const SUCCESS_STATUS: i32 = 1;
pub const FAILURE_STATUS: i32 = 0;

/// Return code the qualification service uses for a successful lookup.
pub const SUCCESS_RETURN_CODE: &str = "0";

// ============ Error messages ============

pub const ERROR_INVALID_ADDRESS: &str =
    "Invalid customer address: addressLine1 and zipCode are required";
pub const ERROR_SPLIT_ADDRESS_FAILED: &str =
    "Address validation failed: Invalid split address response";
pub const ERROR_SPLIT_ADDRESS_SERVICE: &str = "Address validation failed: ";
pub const ERROR_NO_QUALIFICATION_DATA: &str =
    "No qualification data received from Nautilus service";
pub const ERROR_NO_QUALIFICATION_FOR_ADDRESS: &str = "No qualification data found for this address";
pub const ERROR_5G_COVERAGE_CHECK_FAILED: &str = "5G coverage check failed: ";
pub const ERROR_ALL_ADDRESSES_FAILED_SPLIT: &str = "All addresses failed split address validation";
pub const ERROR_ADDRESS_SKIPPED: &str =
    "Address skipped: missing required fields (addressLine1 or zipCode)";

/// Every split failure status starts with this prefix.
pub const SPLIT_FAILURE_PREFIX: &str = "Address validation failed";

// ============ Status messages ============

pub const STATUS_MSG_QUALIFIED: &str = "This address qualifies for 5G service.";
pub const STATUS_MSG_NOT_QUALIFIED: &str = "This address does not qualify for 5G service.";
pub const STATUS_MSG_ADDRESS_VALIDATED: &str = "Address validated successfully";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_failure_messages_share_prefix() {
        assert!(ERROR_SPLIT_ADDRESS_FAILED.starts_with(SPLIT_FAILURE_PREFIX));
        assert!(ERROR_SPLIT_ADDRESS_SERVICE.starts_with(SPLIT_FAILURE_PREFIX));
        assert!(!STATUS_MSG_ADDRESS_VALIDATED.starts_with(SPLIT_FAILURE_PREFIX));
    }
}
