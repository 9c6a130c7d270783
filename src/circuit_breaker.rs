use failsafe::backoff::{self, Exponential};
use failsafe::failure_policy::{self, ConsecutiveFailures};
use failsafe::{Config, StateMachine};
use std::time::Duration;

/// Consecutive failed calls before an endpoint is cut off.
pub const ADAPTER_FAILURE_THRESHOLD: u32 = 5;
/// First wait before a cut-off endpoint is probed again.
pub const ADAPTER_BACKOFF_START: Duration = Duration::from_secs(10);
/// Upper bound for the probe wait.
pub const ADAPTER_BACKOFF_MAX: Duration = Duration::from_secs(60);

/// Breaker guarding one spectrum adapter endpoint.
pub type AdapterCircuitBreaker = StateMachine<ConsecutiveFailures<Exponential>, ()>;

/// One breaker per endpoint: a split outage must not block qualification
/// calls, and the reverse.
///
/// While open, calls are rejected without touching the network and the
/// pipeline records the rejection like any other adapter error.
pub fn create_adapter_circuit_breaker() -> AdapterCircuitBreaker {
    let backoff = backoff::exponential(ADAPTER_BACKOFF_START, ADAPTER_BACKOFF_MAX);
    let policy = failure_policy::consecutive_failures(ADAPTER_FAILURE_THRESHOLD, backoff);

    Config::new().failure_policy(policy).build()
}
