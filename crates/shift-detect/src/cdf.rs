//! CDF-squared change detection
//!
//! Compares the empirical distribution of a trailing reference window
//! against a leading candidate window at every admitted point. The scan has
//! three phases: priming (filling both windows), scanning (one statistic per
//! step), and exhaustion (no further point can enter the candidate window).
//!
//! After a detection the reference window is re-based to start at the change
//! point, so a single shift is reported once instead of at every overlapping
//! offset. Disable `rebase_after_detection` to get the raw point-by-point
//! scan back.

use tracing::{debug, trace};

use shift_core::{Error, Result};
use shift_series::{ColumnKind, DataSeries};

use crate::detection::Detection;
use crate::ecdf::{cdf_squared_distance, mean};
use crate::traits::{DetectorConfig, DetectorProperties, TimeSeriesDetector};

/// CDF detector parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CdfParameters {
    /// Size of the trailing reference window (W_ref)
    pub reference_window: usize,
    /// Size of the leading candidate window (W_new)
    pub candidate_window: usize,
    /// Detection threshold for the squared ECDF distance, in (0, 1]
    pub threshold: f64,
    /// Original column index to read values from; defaults to the first
    /// numeric column of the active view
    pub value_column: Option<usize>,
    /// Re-base the reference window at each detected change point
    pub rebase_after_detection: bool,
}

impl Default for CdfParameters {
    fn default() -> Self {
        Self {
            reference_window: 12,
            candidate_window: 6,
            threshold: 0.15,
            value_column: None,
            rebase_after_detection: true,
        }
    }
}

impl CdfParameters {
    /// Build parameters from an open config set, falling back to defaults
    /// for absent keys and ignoring unrecognized ones.
    pub fn from_config(config: &DetectorConfig) -> Self {
        let defaults = Self::default();
        Self {
            reference_window: config
                .get_usize("reference_window")
                .unwrap_or(defaults.reference_window),
            candidate_window: config
                .get_usize("candidate_window")
                .unwrap_or(defaults.candidate_window),
            threshold: config.get("threshold").unwrap_or(defaults.threshold),
            value_column: config.get_usize("value_column"),
            rebase_after_detection: config
                .get_bool("rebase_after_detection")
                .unwrap_or(defaults.rebase_after_detection),
        }
    }
}

/// Change detector comparing reference and candidate window ECDFs
pub struct CdfDetector<'a> {
    series: &'a mut DataSeries,
    params: CdfParameters,
}

impl<'a> CdfDetector<'a> {
    /// Create a detector with default parameters
    pub fn new(series: &'a mut DataSeries) -> Self {
        Self::with_parameters(series, CdfParameters::default())
    }

    /// Create a detector from an open config set
    pub fn with_config(series: &'a mut DataSeries, config: DetectorConfig) -> Self {
        Self::with_parameters(series, CdfParameters::from_config(&config))
    }

    /// Create a detector with explicit parameters
    pub fn with_parameters(series: &'a mut DataSeries, params: CdfParameters) -> Self {
        Self { series, params }
    }

    /// Registry entry point
    pub fn factory(
        series: &mut DataSeries,
        config: DetectorConfig,
    ) -> Box<dyn TimeSeriesDetector + '_> {
        Box::new(CdfDetector::with_config(series, config))
    }

    /// The active parameters
    pub fn parameters(&self) -> &CdfParameters {
        &self.params
    }

    /// Detect changes, requiring the series to meet the detector's minimum.
    ///
    /// The lazy [`TimeSeriesDetector::detect_changes`] treats a series with
    /// fewer usable points than both windows need as "no detections"; this
    /// entry point surfaces it as an error instead, for callers that want a
    /// hard floor on input size.
    pub fn detect_changes_strict(&mut self) -> Result<Vec<Detection>> {
        let (values, locations) = self.collect_points();
        let minimum = self.minimum_sample_size();
        if values.len() < minimum {
            return Err(Error::InsufficientData {
                expected: minimum,
                actual: values.len(),
            });
        }
        Ok(self.scan(values, locations).collect())
    }

    fn scan(&self, values: Vec<f64>, locations: Vec<String>) -> CdfScan {
        CdfScan {
            position: self.params.reference_window,
            values,
            locations,
            params: self.params.clone(),
        }
    }

    /// Drain the series through its cursor into (value, location) points.
    ///
    /// Values come from the configured column when set, otherwise from the
    /// first numeric column of the active view. Locations prefer a textual
    /// cell (revision, build id) and fall back to the row index. Rows whose
    /// value cell is null are skipped.
    fn collect_points(&mut self) -> (Vec<f64>, Vec<String>) {
        let columns = self.series.active_columns().to_vec();
        let value_pos = match self.params.value_column {
            Some(col) => columns.iter().position(|&c| c == col),
            None => columns
                .iter()
                .position(|&c| self.series.column_kind(c) == Some(ColumnKind::Numeric)),
        };
        let Some(value_pos) = value_pos else {
            return (Vec::new(), Vec::new());
        };

        let mut values = Vec::with_capacity(self.series.len());
        let mut locations = Vec::with_capacity(self.series.len());
        for row in self.series.iter_rows() {
            if let Some(value) = row.number(value_pos) {
                let location = row
                    .label()
                    .map(str::to_string)
                    .unwrap_or_else(|| row.index().to_string());
                values.push(value);
                locations.push(location);
            }
        }
        (values, locations)
    }
}

impl DetectorProperties for CdfDetector<'_> {
    fn algorithm_name(&self) -> &'static str {
        "cdf_squared"
    }

    fn minimum_sample_size(&self) -> usize {
        self.params.reference_window + self.params.candidate_window
    }
}

impl TimeSeriesDetector for CdfDetector<'_> {
    fn detect_changes(&mut self) -> Box<dyn Iterator<Item = Detection> + '_> {
        let (values, locations) = self.collect_points();
        debug!(
            points = values.len(),
            reference_window = self.params.reference_window,
            candidate_window = self.params.candidate_window,
            threshold = self.params.threshold,
            "starting cdf scan"
        );
        Box::new(self.scan(values, locations))
    }
}

/// Lazy detection stream over the collected numeric points.
///
/// `position` is the start of the candidate window; the reference window is
/// the `reference_window` points immediately before it.
struct CdfScan {
    values: Vec<f64>,
    locations: Vec<String>,
    params: CdfParameters,
    position: usize,
}

impl Iterator for CdfScan {
    type Item = Detection;

    fn next(&mut self) -> Option<Detection> {
        let w_ref = self.params.reference_window;
        let w_new = self.params.candidate_window;
        if w_ref == 0 || w_new == 0 {
            return None;
        }

        while self.position >= w_ref
            && self.position.saturating_add(w_new) <= self.values.len()
        {
            let reference = &self.values[self.position - w_ref..self.position];
            let candidate = &self.values[self.position..self.position + w_new];
            let statistic = cdf_squared_distance(reference, candidate);
            trace!(position = self.position, statistic, "cdf step");

            if statistic > self.params.threshold {
                let confidence = (statistic / (2.0 * self.params.threshold)).min(1.0);
                let detection = Detection::new(
                    mean(reference),
                    mean(candidate),
                    confidence,
                    self.locations[self.position].clone(),
                );
                debug!(%detection, statistic, "change detected");
                self.position = if self.params.rebase_after_detection {
                    // Reference re-bases to start at the change point
                    self.position + w_ref
                } else {
                    self.position + 1
                };
                return Some(detection);
            }
            self.position += 1;
        }
        None
    }
}
