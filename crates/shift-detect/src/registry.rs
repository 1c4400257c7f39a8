//! Process-wide detector catalog
//!
//! Maps detector names to factory functions. The catalog is populated once,
//! on first access, from an explicit table of built-in variants; there is no
//! module scanning. Re-registering a name overwrites the previous entry
//! (last write wins), which is how tests and embedders install overrides.

use std::collections::HashMap;
use std::sync::Mutex;

use lazy_static::lazy_static;
use tracing::debug;

use shift_series::DataSeries;

use crate::cdf::CdfDetector;
use crate::traits::{DetectorConfig, TimeSeriesDetector};

/// Constructor for a detector variant: borrows the series exclusively for
/// the lifetime of the produced detector.
pub type DetectorFactory =
    for<'s> fn(&'s mut DataSeries, DetectorConfig) -> Box<dyn TimeSeriesDetector + 's>;

lazy_static! {
    static ref TIMESERIES_DETECTORS: Mutex<HashMap<String, DetectorFactory>> =
        Mutex::new(builtin_detectors());
}

fn builtin_detectors() -> HashMap<String, DetectorFactory> {
    let mut catalog: HashMap<String, DetectorFactory> = HashMap::new();
    catalog.insert("cdf_squared".to_string(), CdfDetector::factory);
    catalog
}

/// Register a detector variant under `name`.
///
/// Idempotent; registering an already-known name replaces the entry.
pub fn register(name: &str, factory: DetectorFactory) {
    debug!(name, "registering timeseries detector");
    TIMESERIES_DETECTORS
        .lock()
        .expect("detector registry lock poisoned")
        .insert(name.to_string(), factory);
}

/// The full catalog of known time series detectors.
///
/// The first call populates the catalog with the built-in variants; later
/// calls reuse it. Factories are plain function pointers, so the returned
/// map is a cheap copy.
pub fn get_timeseries_detectors() -> HashMap<String, DetectorFactory> {
    TIMESERIES_DETECTORS
        .lock()
        .expect("detector registry lock poisoned")
        .clone()
}

/// The full detector catalog.
///
/// Every built-in variant operates on time series, so this is currently the
/// same mapping as [`get_timeseries_detectors`].
pub fn get_detectors() -> HashMap<String, DetectorFactory> {
    get_timeseries_detectors()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::Detection;
    use crate::traits::DetectorProperties;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};
    use shift_series::Value;

    /// Rows shaped like a telemetry metric table: measurement plus revision.
    fn metric_rows(means: &[(usize, f64)], sigma: f64, seed: u64) -> Vec<Vec<Value>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = Normal::new(0.0, sigma).unwrap();
        let mut rows = Vec::new();
        let mut index = 0usize;
        for &(count, mean) in means {
            for _ in 0..count {
                rows.push(vec![
                    Value::from(mean + noise.sample(&mut rng)),
                    Value::from(format!("rev-{index:05}")),
                ]);
                index += 1;
            }
        }
        rows
    }

    struct NamedStub(&'static str);

    impl DetectorProperties for NamedStub {
        fn algorithm_name(&self) -> &'static str {
            self.0
        }
        fn minimum_sample_size(&self) -> usize {
            0
        }
    }

    impl TimeSeriesDetector for NamedStub {
        fn detect_changes(&mut self) -> Box<dyn Iterator<Item = Detection> + '_> {
            Box::new(std::iter::empty())
        }
    }

    fn stub_a(
        _series: &mut DataSeries,
        _config: DetectorConfig,
    ) -> Box<dyn TimeSeriesDetector + '_> {
        Box::new(NamedStub("stub_a"))
    }

    fn stub_b(
        _series: &mut DataSeries,
        _config: DetectorConfig,
    ) -> Box<dyn TimeSeriesDetector + '_> {
        Box::new(NamedStub("stub_b"))
    }

    #[test]
    fn test_builtins_are_present() {
        let catalog = get_timeseries_detectors();
        assert!(catalog.contains_key("cdf_squared"));
    }

    #[test]
    fn test_last_registration_wins() {
        register("registry_test_override", stub_a);
        register("registry_test_override", stub_b);

        let catalog = get_timeseries_detectors();
        let factory = catalog["registry_test_override"];
        let mut series = DataSeries::from_rows(vec![]).unwrap();
        let detector = factory(&mut series, DetectorConfig::new());
        assert_eq!(detector.algorithm_name(), "stub_b");
    }

    #[test]
    fn test_factory_end_to_end() {
        let rows: Vec<Vec<Value>> = (0..60)
            .map(|i| vec![Value::from(if i < 30 { 1.0 } else { 6.0 })])
            .collect();
        let mut series = DataSeries::from_rows(rows).unwrap();

        let catalog = get_timeseries_detectors();
        let factory = catalog["cdf_squared"];
        let mut detector = factory(&mut series, DetectorConfig::new());
        let detections: Vec<Detection> = detector.detect_changes().collect();
        assert_eq!(detections.len(), 1);
    }

    #[test]
    fn test_detects_a_regression_in_a_noisy_metric() {
        let rows = metric_rows(&[(50, 120.0), (50, 150.0)], 1.5, 7);
        let mut series = DataSeries::from_rows(rows).unwrap();

        let catalog = get_timeseries_detectors();
        let factory = catalog["cdf_squared"];
        let mut detector = factory(&mut series, DetectorConfig::new());
        let detections: Vec<Detection> = detector.detect_changes().collect();

        assert_eq!(detections.len(), 1);
        let detection = &detections[0];
        assert!(detection.location.starts_with("rev-"));
        assert!(detection.confidence > 0.0 && detection.confidence <= 1.0);
        assert_relative_eq!(detection.previous_value, 120.0, epsilon = 2.0);
        // The candidate window can straddle the step, so its mean sits
        // between the two levels; it must still show a clear jump.
        assert!(detection.new_value > detection.previous_value + 15.0);
    }

    #[test]
    fn test_stable_metric_produces_no_detections() {
        let rows = metric_rows(&[(100, 120.0)], 1.5, 11);
        let mut series = DataSeries::from_rows(rows).unwrap();

        let catalog = get_timeseries_detectors();
        let factory = catalog["cdf_squared"];
        let mut detector = factory(&mut series, DetectorConfig::new());
        assert_eq!(detector.detect_changes().count(), 0);
    }
}
