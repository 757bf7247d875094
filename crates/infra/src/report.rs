//! CSV summary report.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use marketlens_analysis::AnalysisReport;

use crate::error::{InfraError, InfraResult};

/// One CSV line: `name,revenue,holding_cost,order_cost,profit`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow<'a> {
    pub name: &'a str,
    pub revenue: f64,
    pub holding_cost: f64,
    pub order_cost: f64,
    pub profit: f64,
}

/// Rows in registry display order.
pub fn report_rows(report: &AnalysisReport) -> Vec<ReportRow<'_>> {
    report
        .rows()
        .into_iter()
        .map(|row| ReportRow {
            name: row.name,
            revenue: row.financials.revenue,
            holding_cost: row.financials.holding_cost,
            order_cost: row.financials.order_cost,
            profit: row.financials.profit(),
        })
        .collect()
}

/// Serialize the report into any writer.
pub fn write_report_to<W: Write>(writer: W, report: &AnalysisReport) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    let rows = report_rows(report);
    if rows.is_empty() {
        // serde-driven headers are only emitted with the first record.
        csv.write_record(["name", "revenue", "holding_cost", "order_cost", "profit"])?;
    }
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the report file, replacing any previous one.
pub fn write_report(path: &Path, report: &AnalysisReport) -> InfraResult<()> {
    let file = std::fs::File::create(path).map_err(InfraError::io(path))?;
    write_report_to(file, report).map_err(InfraError::csv(path))?;
    tracing::info!(path = %path.display(), merchants = report.registry().len(), "report written");
    Ok(())
}
