//! Accounting module: per-merchant revenue, costs and profit.
//!
//! Pure domain logic only: no IO, no logging, no persistence concerns.

pub mod financials;

pub use financials::{aggregate_financials, MerchantFinancials, RevenuePolicy};
