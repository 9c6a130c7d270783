use std::fmt;

/// Application-specific error types.
///
/// None of these reach the HTTP boundary directly: the coverage pipeline turns
/// each one into either an error response or a per-address status message.
#[derive(Debug, Clone)]
pub enum AppError {
    /// The address list was missing or empty.
    InvalidArgument(String),
    /// Every address was filtered out before qualification.
    NoValidAddresses(String),
    /// The split stage produced nothing to work with.
    AllAddressesFailedSplit(String),
    /// Error interacting with an external API.
    ExternalApiError(String),
    /// The circuit breaker guarding an adapter endpoint rejected the call.
    CircuitOpen(String),
}

impl AppError {
    /// Message without the variant label, used when the error text is shown to callers.
    pub fn message(&self) -> String {
        match self {
            AppError::InvalidArgument(msg)
            | AppError::NoValidAddresses(msg)
            | AppError::AllAddressesFailedSplit(msg)
            | AppError::ExternalApiError(msg)
            | AppError::CircuitOpen(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            AppError::NoValidAddresses(msg) => write!(f, "No valid addresses: {}", msg),
            AppError::AllAddressesFailedSplit(msg) => write!(f, "Split failed: {}", msg),
            AppError::ExternalApiError(msg) => write!(f, "External API error: {}", msg),
            AppError::CircuitOpen(msg) => write!(f, "Circuit open: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalApiError(err.to_string())
    }
}
