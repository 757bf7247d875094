//! `marketlens-core` — shared building blocks for the analysis crates.
//!
//! This crate contains **pure** primitives (no IO, no logging): merchant
//! identity, the merchant registry, timestamp parsing and the domain error.

pub mod error;
pub mod id;
pub mod registry;
pub mod time;

pub use error::{DomainError, DomainResult};
pub use id::MerchantId;
pub use registry::MerchantRegistry;
pub use time::{format_timestamp, parse_timestamp, Timestamp, MAX_FRACTION_DIGITS, TIMESTAMP_FORMAT};
