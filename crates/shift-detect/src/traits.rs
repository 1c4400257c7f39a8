//! Core traits for time series change detection
//!
//! Detectors are split into two capabilities, so that catalogs and drivers
//! can ask about an algorithm without running it:
//! - [`DetectorProperties`]: name and minimum input size
//! - [`TimeSeriesDetector`]: the single `detect_changes` operation
//!
//! A detector borrows its series exclusively for the duration of one
//! `detect_changes` call; it may advance the series cursor freely but must
//! never alter row contents.

use std::collections::HashMap;

use crate::detection::Detection;

/// Properties of a detector that don't depend on the series it analyzes
pub trait DetectorProperties {
    /// Name of the detection algorithm, as used in the registry
    fn algorithm_name(&self) -> &'static str;

    /// Minimum number of usable points required to produce any detection
    fn minimum_sample_size(&self) -> usize;
}

/// The capability every concrete detector variant must implement
pub trait TimeSeriesDetector: DetectorProperties {
    /// Scan the series and lazily yield the changes found.
    ///
    /// The returned sequence is finite and terminates when the series is
    /// exhausted. A series with too few usable points yields an empty
    /// sequence, never an error.
    fn detect_changes(&mut self) -> Box<dyn Iterator<Item = Detection> + '_>;
}

/// An open set of detector options.
///
/// Recognized keys are detector-specific; unrecognized keys are accepted
/// and ignored. Values are numeric, with helpers for the integral and
/// boolean options detectors actually read.
#[derive(Debug, Clone, Default)]
pub struct DetectorConfig {
    options: HashMap<String, f64>,
}

impl DetectorConfig {
    /// An empty configuration; detectors fall back to their defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, consuming and returning the config for chaining
    pub fn set(mut self, key: &str, value: f64) -> Self {
        self.options.insert(key.to_string(), value);
        self
    }

    /// Read an option as a float
    pub fn get(&self, key: &str) -> Option<f64> {
        self.options.get(key).copied()
    }

    /// Read an option as a non-negative integer, truncating
    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).map(|v| if v > 0.0 { v as usize } else { 0 })
    }

    /// Read an option as a flag; any nonzero value is true
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).map(|v| v != 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_accessors() {
        let config = DetectorConfig::new()
            .set("threshold", 0.2)
            .set("reference_window", 14.0)
            .set("rebase_after_detection", 0.0);

        assert_eq!(config.get("threshold"), Some(0.2));
        assert_eq!(config.get_usize("reference_window"), Some(14));
        assert_eq!(config.get_bool("rebase_after_detection"), Some(false));
        assert_eq!(config.get("not_a_key"), None);
    }

    #[test]
    fn test_negative_sizes_truncate_to_zero() {
        let config = DetectorConfig::new().set("candidate_window", -3.0);
        assert_eq!(config.get_usize("candidate_window"), Some(0));
    }
}
