//! Infrastructure layer: dump loading, report and chart output, run config.

pub mod charts;
pub mod config;
pub mod dump;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::AnalyzerConfig;
pub use error::{InfraError, InfraResult};
pub use pipeline::{run, RunSummary};
