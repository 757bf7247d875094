//! End-to-end analyzer run: load → analyze → report → charts.

use std::path::PathBuf;

use marketlens_analysis::analyze;

use crate::charts::{render_inventory_chart, render_price_chart};
use crate::config::AnalyzerConfig;
use crate::dump::load_dump;
use crate::error::{InfraError, InfraResult};
use crate::report::write_report;

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub merchants: usize,
    pub report_path: PathBuf,
    pub charts: Vec<PathBuf>,
}

pub fn run(config: &AnalyzerConfig) -> InfraResult<RunSummary> {
    let span = tracing::info_span!("analyze", dir = %config.input_dir().display());
    let _guard = span.enter();

    let input = load_dump(config.input_dir())?;
    let report = analyze(&input, config.analysis_options())?;
    tracing::info!(policy = ?config.revenue_policy, merchants = report.registry().len(), "analysis complete");

    std::fs::create_dir_all(&config.output_dir).map_err(InfraError::io(&config.output_dir))?;

    let report_path = config.report_path();
    write_report(&report_path, &report)?;

    let mut charts = Vec::new();
    if config.render_charts {
        let inventory_path = config.inventory_chart_path();
        if render_inventory_chart(&inventory_path, &report)? {
            charts.push(inventory_path);
        }
        let price_path = config.price_chart_path();
        if render_price_chart(&price_path, &report)? {
            charts.push(price_path);
        }
    }

    Ok(RunSummary {
        merchants: report.registry().len(),
        report_path,
        charts,
    })
}
