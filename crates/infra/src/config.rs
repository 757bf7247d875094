//! Configuration of one analyzer run.

use std::path::{Path, PathBuf};

use marketlens_accounting::RevenuePolicy;
use marketlens_analysis::AnalysisOptions;

pub const REPORT_FILE: &str = "results.csv";
pub const INVENTORY_CHART_FILE: &str = "inventory_levels.svg";
pub const PRICE_CHART_FILE: &str = "prices.svg";

/// Where to read the dump, where to write results, and what to compute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub revenue_policy: RevenuePolicy,
    pub render_charts: bool,
}

impl AnalyzerConfig {
    /// Defaults: results next to the dump, successful sales only, charts on.
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        let input_dir = input_dir.into();
        Self {
            output_dir: input_dir.clone(),
            input_dir,
            revenue_policy: RevenuePolicy::default(),
            render_charts: true,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_revenue_policy(mut self, policy: RevenuePolicy) -> Self {
        self.revenue_policy = policy;
        self
    }

    pub fn with_charts(mut self, render: bool) -> Self {
        self.render_charts = render;
        self
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            revenue_policy: self.revenue_policy,
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE)
    }

    pub fn inventory_chart_path(&self) -> PathBuf {
        self.output_dir.join(INVENTORY_CHART_FILE)
    }

    pub fn price_chart_path(&self) -> PathBuf {
        self.output_dir.join(PRICE_CHART_FILE)
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }
}
