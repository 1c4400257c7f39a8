//! Running a registry-selected detector over a sampled metric
//!
//! The telemetry query layer lives outside this crate; `fetch_metric_table`
//! stands in for it and returns rows shaped the way `DataSeries` accepts
//! them: a measurement column next to a revision label.

use shift_detect::{get_timeseries_detectors, DetectorConfig};
use shift_series::{DataSeries, Value};

/// Stand-in for the external telemetry query collaborator
fn fetch_metric_table(_metric: &str, _platform: &str) -> Vec<Vec<Value>> {
    (0..80)
        .map(|i| {
            // Handshake times drift up by ~40% at build 40
            let base = if i < 40 { 21.0 } else { 29.5 };
            let jitter = (i % 7) as f64 * 0.3;
            vec![
                Value::from(base + jitter),
                Value::from(format!("build-{i:04}")),
            ]
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("Querying for data...");
    let rows = fetch_metric_table("network_tls_handshake", "Windows");
    let mut series = DataSeries::from_rows(rows)?;

    println!("Running detections...");
    let detectors = get_timeseries_detectors();
    let factory = detectors["cdf_squared"];
    let config = DetectorConfig::new()
        .set("reference_window", 14.0)
        .set("candidate_window", 7.0);
    let mut detector = factory(&mut series, config);

    for detection in detector.detect_changes() {
        println!("{detection}");
    }

    Ok(())
}
