//! shift-scan: change detection for performance telemetry time series
//!
//! Scans a sequence of measurements (e.g. per-build performance metrics)
//! and flags points where the underlying value distribution shifts. The
//! workspace splits into:
//!
//! - [`shift_series`]: the [`DataSeries`] table abstraction with a movable
//!   cursor, typed columns, and bounded windowed reads
//! - [`shift_detect`]: the detector contract, the name-to-variant registry,
//!   and the CDF-squared divergence detector
//! - [`shift_core`]: the shared error type
//!
//! # Quick start
//!
//! ```rust
//! use shift_scan::{CdfDetector, DataSeries, TimeSeriesDetector, Value};
//!
//! let rows: Vec<Vec<Value>> = (0..60)
//!     .map(|i| vec![Value::from(if i < 30 { 12.0 } else { 17.0 })])
//!     .collect();
//! let mut series = DataSeries::from_rows(rows).unwrap();
//!
//! let mut detector = CdfDetector::new(&mut series);
//! for detection in detector.detect_changes() {
//!     println!("{detection}");
//! }
//! ```

pub use shift_core::{Error, Result};
pub use shift_detect::{
    get_detectors, get_timeseries_detectors, register, CdfDetector, CdfParameters, Detection,
    DetectorConfig, DetectorFactory, DetectorProperties, TimeSeriesDetector,
};
pub use shift_series::{ColumnKind, DataSeries, Row, RowCursor, Value, ViewMode};

pub use shift_core;
pub use shift_detect;
pub use shift_series;
