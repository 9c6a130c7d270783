//! 5G Home Internet Coverage API Library
//!
//! Validates customer addresses through the address-splitting service,
//! qualifies them in one bulk call against the coverage-qualification
//! service, and maps the per-address verdicts back onto the request.
//!
//! # Modules
//!
//! - `adapter_models`: Wire contracts for the split-address and qualification calls.
//! - `circuit_breaker`: Circuit breaker guarding each adapter endpoint.
//! - `config`: Configuration management.
//! - `constants`: Status codes and status/error messages.
//! - `coverage`: The split → gate → qualify pipeline.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Customer address and API request/response models.
//! - `reconciler`: Maps qualification records back onto addresses.
//! - `request_builder`: Outbound request construction and address validity rules.
//! - `services`: Adapter trait and HTTP client.

pub mod adapter_models;
pub mod circuit_breaker;
pub mod config;
pub mod constants;
pub mod coverage;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod reconciler;
pub mod request_builder;
pub mod services;
