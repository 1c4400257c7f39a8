//! Empirical CDF comparison kernel
//!
//! The squared ECDF distance between two windows: the squared difference of
//! the two empirical CDFs, integrated over the pooled value domain with the
//! pooled point mass as the weight. The statistic is 0 exactly when the two
//! windows have identical empirical distributions, grows with divergence,
//! and is bounded by 1, which keeps thresholds unit-free.

use std::cmp::Ordering;

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Fraction of `sorted` that is <= `x`
fn ecdf_at(sorted: &[f64], x: f64) -> f64 {
    let count = sorted.partition_point(|&v| v <= x);
    count as f64 / sorted.len() as f64
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    out
}

/// Squared ECDF distance between a reference and a candidate window.
///
/// Computed as `sum over distinct pooled x of (F_ref(x) - F_cand(x))^2 *
/// w(x)` where `w(x)` is the pooled point mass of `x`. Either window being
/// empty gives 0 (insufficient data, not an error).
pub fn cdf_squared_distance(reference: &[f64], candidate: &[f64]) -> f64 {
    if reference.is_empty() || candidate.is_empty() {
        return 0.0;
    }

    let sorted_ref = sorted_copy(reference);
    let sorted_cand = sorted_copy(candidate);

    let mut pooled = Vec::with_capacity(reference.len() + candidate.len());
    pooled.extend_from_slice(&sorted_ref);
    pooled.extend_from_slice(&sorted_cand);
    pooled.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let total = pooled.len() as f64;

    let mut statistic = 0.0;
    let mut i = 0;
    while i < pooled.len() {
        let x = pooled[i];
        let mut mass = 1;
        while i + mass < pooled.len() && pooled[i + mass] == x {
            mass += 1;
        }
        let diff = ecdf_at(&sorted_ref, x) - ecdf_at(&sorted_cand, x);
        statistic += diff * diff * (mass as f64 / total);
        i += mass;
    }
    statistic
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_identical_windows_score_zero() {
        let window = [3.0, 1.0, 2.0, 2.0, 5.0];
        assert_abs_diff_eq!(cdf_squared_distance(&window, &window), 0.0);
    }

    #[test]
    fn test_identical_distributions_score_zero() {
        // Same empirical distribution, different sample order
        let reference = [1.0, 2.0, 3.0];
        let candidate = [3.0, 1.0, 2.0];
        assert_abs_diff_eq!(cdf_squared_distance(&reference, &candidate), 0.0);
    }

    #[test]
    fn test_statistic_grows_with_divergence() {
        let reference = [1.0, 2.0, 3.0, 4.0];
        let overlapping = [3.0, 4.0, 5.0, 6.0];
        let disjoint = [5.0, 6.0, 7.0, 8.0];

        let small = cdf_squared_distance(&reference, &overlapping);
        let large = cdf_squared_distance(&reference, &disjoint);
        assert!(small > 0.0);
        assert!(large > small);
    }

    #[test]
    fn test_full_shift_magnitude() {
        // Two disjoint windows of n distinct values each approach 1/3
        let reference: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let candidate: Vec<f64> = (100..150).map(|i| i as f64).collect();
        let statistic = cdf_squared_distance(&reference, &candidate);
        assert_relative_eq!(statistic, 1.0 / 3.0, epsilon = 0.02);
    }

    #[test]
    fn test_bounded_by_one() {
        let reference = [0.0, 0.0];
        let candidate = [1.0, 1.0];
        let statistic = cdf_squared_distance(&reference, &candidate);
        assert!(statistic <= 1.0);
    }

    #[test]
    fn test_empty_window_scores_zero() {
        assert_abs_diff_eq!(cdf_squared_distance(&[], &[1.0]), 0.0);
        assert_abs_diff_eq!(cdf_squared_distance(&[1.0], &[]), 0.0);
    }

    #[test]
    fn test_mean() {
        assert_abs_diff_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_abs_diff_eq!(mean(&[]), 0.0);
    }
}
