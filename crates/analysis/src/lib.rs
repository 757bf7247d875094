//! One analysis run: raw batches in, per-merchant series and totals out.
//!
//! Pure and synchronous. The caller owns loading the batches and emitting the
//! report.

pub mod run;

pub use run::{analyze, AnalysisError, AnalysisInput, AnalysisOptions, AnalysisReport, Batch, MerchantRow};
