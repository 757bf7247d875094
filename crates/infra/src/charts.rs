//! SVG line charts of inventory levels and prices over time.

use std::error::Error;
use std::path::Path;

use chrono::Duration;
use plotters::prelude::*;

use marketlens_analysis::AnalysisReport;
use marketlens_core::Timestamp;

use crate::error::{InfraError, InfraResult};

const CHART_SIZE: (u32, u32) = (1024, 600);

/// One labelled line.
#[derive(Clone)]
pub struct Series {
    pub label: String,
    pub points: Vec<(Timestamp, f64)>,
    pub color: RGBAColor,
}

fn color(idx: usize) -> RGBAColor {
    Palette99::pick(idx).to_rgba()
}

/// Stock level and price per merchant, in registry display order.
pub fn inventory_series(report: &AnalysisReport) -> Vec<Series> {
    let mut series = Vec::new();
    for (idx, (id, name)) in report.registry().in_display_order().into_iter().enumerate() {
        if let Some(timeline) = report.inventory().get(id).filter(|t| !t.is_empty()) {
            series.push(Series {
                label: format!("{name} inventory"),
                points: timeline.levels().iter().map(|l| (l.timestamp, l.level as f64)).collect(),
                color: color(2 * idx),
            });
        }
        if let Some(timeline) = report.prices().get(id).filter(|t| !t.is_empty()) {
            series.push(Series {
                label: format!("{name} price"),
                points: timeline.points().iter().map(|p| (p.timestamp, p.price)).collect(),
                color: color(2 * idx + 1),
            });
        }
    }
    series
}

/// Price per merchant, in registry display order.
pub fn price_series(report: &AnalysisReport) -> Vec<Series> {
    report
        .registry()
        .in_display_order()
        .into_iter()
        .enumerate()
        .filter_map(|(idx, (id, name))| {
            let timeline = report.prices().get(id).filter(|t| !t.is_empty())?;
            Some(Series {
                label: name.to_string(),
                points: timeline.points().iter().map(|p| (p.timestamp, p.price)).collect(),
                color: color(idx),
            })
        })
        .collect()
}

/// Axis bounds covering every point, never degenerate.
fn bounds(series: &[Series]) -> Option<((Timestamp, Timestamp), (f64, f64))> {
    let mut points = series.iter().flat_map(|s| s.points.iter().copied());
    let (t0, v0) = points.next()?;
    let ((t_min, t_max), (v_min, v_max)) = points.fold(((t0, t0), (v0, v0)), |((t_lo, t_hi), (v_lo, v_hi)), (t, v)| {
        ((t_lo.min(t), t_hi.max(t)), (v_lo.min(v), v_hi.max(v)))
    });

    let t_max = if t_max > t_min { t_max } else { t_min + Duration::seconds(1) };
    let pad = if v_max > v_min { (v_max - v_min) * 0.05 } else { 1.0 };
    Some(((t_min, t_max), (v_min - pad, v_max + pad)))
}

fn draw(path: &Path, title: &str, y_desc: &str, series: &[Series]) -> Result<bool, Box<dyn Error>> {
    let Some(((t_min, t_max), (v_min, v_max))) = bounds(series) else {
        return Ok(false);
    };

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(t_min..t_max, v_min..v_max)?;

    chart
        .configure_mesh()
        .x_labels(6)
        .x_label_formatter(&|ts: &Timestamp| ts.format("%m-%d %H:%M").to_string())
        .y_desc(y_desc)
        .draw()?;

    for s in series {
        let color = s.color;
        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), color.stroke_width(2)))?
            .label(s.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(true)
}

/// Render a chart; returns `false` (and writes nothing) when there is no data.
pub fn render_chart(path: &Path, title: &str, y_desc: &str, series: &[Series]) -> InfraResult<bool> {
    let written = draw(path, title, y_desc, series).map_err(|e| InfraError::chart(path)(e.to_string()))?;
    if written {
        tracing::info!(path = %path.display(), series = series.len(), "chart written");
    } else {
        tracing::debug!(path = %path.display(), "chart skipped: no data");
    }
    Ok(written)
}

pub fn render_inventory_chart(path: &Path, report: &AnalysisReport) -> InfraResult<bool> {
    render_chart(path, "Inventory level and price", "units / price", &inventory_series(report))
}

pub fn render_price_chart(path: &Path, report: &AnalysisReport) -> InfraResult<bool> {
    render_chart(path, "Price", "price", &price_series(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketlens_analysis::{analyze, AnalysisInput, AnalysisOptions};
    use marketlens_core::{MerchantId, MerchantRegistry};
    use marketlens_events::{RawOffer, RawOrder};

    fn merchant(id: &str) -> MerchantId {
        MerchantId::new(id).unwrap()
    }

    fn report() -> AnalysisReport {
        let registry: MerchantRegistry = [
            (merchant("m1"), "Acme".to_string()),
            (merchant("m2"), "Globex".to_string()),
        ]
        .into_iter()
        .collect();
        let input = AnalysisInput {
            registry,
            orders: vec![
                RawOrder {
                    merchant_id: merchant("m1"),
                    amount: 5,
                    billing_amount: 3.0,
                    timestamp: "2018-02-01T10:00:00.000Z".to_string(),
                },
                RawOrder {
                    merchant_id: merchant("m1"),
                    amount: 2,
                    billing_amount: 1.0,
                    timestamp: "2018-02-01T11:00:00.000Z".to_string(),
                },
            ],
            offers_created: vec![RawOffer {
                merchant_id: merchant("m1"),
                price: 9.5,
                timestamp: "2018-02-01T10:00:00.000Z".to_string(),
            }],
            ..AnalysisInput::default()
        };
        analyze(&input, AnalysisOptions::default()).unwrap()
    }

    #[test]
    fn series_skip_merchants_without_data() {
        let report = report();
        let labels: Vec<String> = inventory_series(&report).into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Acme inventory", "Acme price"]);
        let prices = price_series(&report);
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].points.len(), 1);
    }

    #[test]
    fn bounds_are_never_degenerate() {
        let report = report();
        let ((t_min, t_max), (v_min, v_max)) = bounds(&price_series(&report)).unwrap();
        assert!(t_max > t_min);
        assert!(v_max > v_min);
        assert!(bounds(&[]).is_none());
    }

    #[test]
    fn renders_svg_files() {
        let dir = tempfile::tempdir().unwrap();
        let report = report();

        let inventory = dir.path().join("inventory_levels.svg");
        assert!(render_inventory_chart(&inventory, &report).unwrap());
        let svg = std::fs::read_to_string(&inventory).unwrap();
        assert!(svg.contains("<svg"));

        let prices = dir.path().join("prices.svg");
        assert!(render_price_chart(&prices, &report).unwrap());
        assert!(prices.exists());
    }

    #[test]
    fn empty_report_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let report = analyze(&AnalysisInput::default(), AnalysisOptions::default()).unwrap();
        let path = dir.path().join("prices.svg");
        assert!(!render_price_chart(&path, &report).unwrap());
        assert!(!path.exists());
    }
}
