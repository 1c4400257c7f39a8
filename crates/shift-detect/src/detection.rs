//! The value object describing one detected change

use std::fmt;

/// A single detected change in a time series.
///
/// Produced only by detectors, at the moment a change is confirmed, and
/// never mutated afterwards. Equality is by value over all four fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Representative value of the reference window before the change
    pub previous_value: f64,
    /// Representative value of the candidate window after the change
    pub new_value: f64,
    /// Detection strength in (0, 1], monotone in the underlying statistic
    pub confidence: f64,
    /// Where the change was detected: a revision, build id, or row index
    pub location: String,
}

impl Detection {
    /// Create a new detected change
    pub fn new(
        previous_value: f64,
        new_value: f64,
        confidence: f64,
        location: impl Into<String>,
    ) -> Self {
        Self {
            previous_value,
            new_value,
            confidence,
            location: location.into(),
        }
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Detection {{ previous_value: {:.3}, new_value: {:.3}, confidence: {:.3}, location: {} }}",
            self.previous_value, self.new_value, self.confidence, self.location
        )
    }
}
