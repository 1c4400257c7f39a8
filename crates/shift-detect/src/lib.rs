//! Pluggable change detection for telemetry time series
//!
//! This crate provides the detector layer of shift-scan: the
//! [`TimeSeriesDetector`] contract, the process-wide detector registry, and
//! the CDF-squared detector, which flags points where the empirical value
//! distribution of a leading window diverges from a trailing one.
//!
//! # Usage
//!
//! ```rust
//! use shift_series::{DataSeries, Value};
//! use shift_detect::{CdfDetector, TimeSeriesDetector};
//!
//! // A series with a mean shift at index 30
//! let rows: Vec<Vec<Value>> = (0..60)
//!     .map(|i| vec![Value::from(if i < 30 { 1.0 } else { 6.0 })])
//!     .collect();
//! let mut series = DataSeries::from_rows(rows).unwrap();
//!
//! let mut detector = CdfDetector::new(&mut series);
//! let detections: Vec<_> = detector.detect_changes().collect();
//! assert_eq!(detections.len(), 1);
//! ```
//!
//! Detectors can also be looked up by name through the registry, which is
//! how drivers stay decoupled from concrete variants:
//!
//! ```rust
//! use shift_detect::{get_timeseries_detectors, DetectorConfig};
//! # use shift_series::{DataSeries, Value};
//! # let mut series = DataSeries::from_rows(
//! #     (0..60).map(|i| vec![Value::from(i as f64)]).collect()
//! # ).unwrap();
//!
//! let detectors = get_timeseries_detectors();
//! let factory = detectors["cdf_squared"];
//! let mut detector = factory(&mut series, DetectorConfig::new());
//! for detection in detector.detect_changes() {
//!     println!("{detection}");
//! }
//! ```

pub mod cdf;
pub mod detection;
pub mod ecdf;
pub mod registry;
pub mod traits;

pub use cdf::{CdfDetector, CdfParameters};
pub use detection::Detection;
pub use registry::{get_detectors, get_timeseries_detectors, register, DetectorFactory};
pub use traits::{DetectorConfig, DetectorProperties, TimeSeriesDetector};
