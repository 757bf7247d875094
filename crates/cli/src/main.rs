use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use marketlens_accounting::RevenuePolicy;
use marketlens_infra::AnalyzerConfig;
use marketlens_observability::LogFormat;

/// Analyze a market benchmark dump: per-merchant profit report plus
/// inventory and price charts.
#[derive(Debug, Parser)]
#[command(name = "marketlens", version)]
struct Cli {
    /// Dump directory containing merchant_id_mapping.json and kafka/.
    #[arg(short, long, env = "MARKETLENS_DIRECTORY", value_name = "DIR")]
    directory: PathBuf,

    /// Where to write results.csv and the charts (defaults to --directory).
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Count failed sale attempts as revenue, like the legacy report did.
    #[arg(long)]
    include_failed_sales: bool,

    /// Skip chart rendering.
    #[arg(long)]
    no_charts: bool,

    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty, env = "MARKETLENS_LOG_FORMAT")]
    log_format: LogFormatArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

impl Cli {
    fn config(&self) -> AnalyzerConfig {
        let policy = if self.include_failed_sales {
            RevenuePolicy::AllAttempts
        } else {
            RevenuePolicy::SuccessfulOnly
        };

        let config = AnalyzerConfig::new(&self.directory)
            .with_revenue_policy(policy)
            .with_charts(!self.no_charts);

        match &self.output {
            Some(dir) => config.with_output_dir(dir),
            None => config,
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.config();
    let summary = marketlens_infra::run(&config)
        .with_context(|| format!("analysis of {} failed", config.input_dir.display()))?;

    tracing::info!(
        merchants = summary.merchants,
        report = %summary.report_path.display(),
        charts = summary.charts.len(),
        "done"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    marketlens_observability::init(cli.log_format.into());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
