//! Full analyzer run over a dump directory on disk.

use std::fs;
use std::path::Path;

use marketlens_accounting::RevenuePolicy;
use marketlens_infra::{run, AnalyzerConfig, InfraError};

fn write(dir: &Path, rel: &str, body: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

/// Two registered merchants, one unregistered, one failed sale.
fn write_dump(dir: &Path) {
    write(dir, "merchant_id_mapping.json", r#"{"m1": "Acme", "m2": "Bravo"}"#);
    write(
        dir,
        "kafka/buyOffer",
        r#"[
            {"merchant_id": "m1", "amount": 2, "price": 10.0, "http_code": 200, "timestamp": "2018-02-01T10:05:00.000000Z"},
            {"merchant_id": "m1", "amount": 1, "price": 10.0, "http_code": 410, "timestamp": "2018-02-01T10:06:00.000000Z"},
            {"merchant_id": "m2", "amount": 1, "price": 4.0, "http_code": 200, "timestamp": "2018-02-01T10:07:00.000000Z"},
            {"merchant_id": "ghost", "amount": 9, "price": 1.0, "http_code": 200, "timestamp": "2018-02-01T10:08:00.000000Z"}
        ]"#,
    );
    write(
        dir,
        "kafka/producer",
        r#"[
            {"merchant_id": "m1", "amount": 5, "billing_amount": 3.0, "timestamp": "2018-02-01T10:00:00.000000Z"},
            {"merchant_id": "m2", "amount": 3, "billing_amount": 2.0, "timestamp": "2018-02-01T10:01:00.000000Z"}
        ]"#,
    );
    write(
        dir,
        "kafka/holding_cost",
        r#"[{"merchant_id": "m1", "cost": 1.0}, {"merchant_id": "m2", "cost": 0.5}]"#,
    );
    write(
        dir,
        "kafka/addOffer",
        r#"[{"merchant_id": "m1", "price": 10.0, "timestamp": "2018-02-01T10:00:00.000000Z"}]"#,
    );
    write(
        dir,
        "kafka/updateOffer",
        r#"[{"merchant_id": "m1", "price": 12.0, "timestamp": "2018-02-01T10:10:00.000000Z"}]"#,
    );
}

#[test]
fn run_writes_report_and_charts() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());

    let summary = run(&AnalyzerConfig::new(dir.path())).unwrap();

    assert_eq!(summary.merchants, 2);
    assert_eq!(summary.charts.len(), 2);
    assert!(summary.charts.iter().all(|p| p.exists()));

    let csv = fs::read_to_string(&summary.report_path).unwrap();
    assert_eq!(
        csv,
        "name,revenue,holding_cost,order_cost,profit\n\
         Acme,20.0,1.0,3.0,16.0\n\
         Bravo,4.0,0.5,2.0,1.5\n"
    );
}

#[test]
fn legacy_policy_counts_failed_sales() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());
    let out = tempfile::tempdir().unwrap();

    let config = AnalyzerConfig::new(dir.path())
        .with_output_dir(out.path().join("results"))
        .with_revenue_policy(RevenuePolicy::AllAttempts)
        .with_charts(false);
    let summary = run(&config).unwrap();

    assert!(summary.charts.is_empty());
    let csv = fs::read_to_string(out.path().join("results/results.csv")).unwrap();
    assert!(csv.contains("Acme,30.0,1.0,3.0,26.0"));
    assert!(!dir.path().join("results.csv").exists());
}

#[test]
fn malformed_timestamp_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path());
    write(
        dir.path(),
        "kafka/addOffer",
        r#"[{"merchant_id": "m1", "price": 10.0, "timestamp": "2018-02-01 10:00:00"}]"#,
    );

    let err = run(&AnalyzerConfig::new(dir.path()).with_charts(false)).unwrap_err();
    assert!(matches!(err, InfraError::Analysis(_)));
    assert_eq!(err.to_string(), "addOffer batch rejected");
    assert!(!dir.path().join("results.csv").exists());
}
