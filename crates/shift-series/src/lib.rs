//! Time series representation for change detection
//!
//! This crate provides [`DataSeries`], an ordered, column-typed table with a
//! movable cursor. It is the common input format for all detectors: rows may
//! mix numeric and textual columns (e.g. a measurement next to a revision
//! id), short rows are padded with nulls, and detectors traverse the series
//! through bounded windowed reads or cursor iteration.
//!
//! # Example
//!
//! ```rust
//! use shift_series::{DataSeries, Value, ViewMode};
//!
//! let rows = vec![
//!     vec![Value::from(1.0), Value::from("rev-a")],
//!     vec![Value::from(2.0), Value::from("rev-b")],
//!     vec![Value::from(9.0), Value::from("rev-c")],
//! ];
//! let mut series = DataSeries::from_rows(rows).unwrap();
//!
//! series.set_view(ViewMode::Numeric).unwrap();
//! for row in series.iter_rows() {
//!     println!("{:?}", row.number(0));
//! }
//! ```

pub mod series;
pub mod value;

pub use series::{DataSeries, Row, RowCursor, ViewMode};
pub use value::{Column, ColumnKind, Value};
