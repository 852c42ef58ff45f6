//! Statistical utility functions.
//!
//! Percentiles here follow the linear interpolation definition: for `n`
//! sorted values the `p`-th percentile sits at fractional rank
//! `p / 100 * (n - 1)` and is interpolated between the two neighbouring
//! order statistics.

use crate::error::{ParesError, Result};

/// Compute the `pct`-th percentile of `values` with linear interpolation.
///
/// # Errors
///
/// Returns an error if `values` is empty, contains a non-finite value, or
/// `pct` lies outside `[0, 100]`.
///
/// # Examples
///
/// ```
/// use pares_traits::stats::percentile;
///
/// let p = percentile(&[1.0, 2.0, 3.0, 4.0], 50.0).unwrap();
/// assert!((p - 2.5).abs() < 1e-12);
/// ```
pub fn percentile(values: &[f64], pct: f64) -> Result<f64> {
    let sorted = sorted_finite(values)?;
    interpolate(&sorted, pct)
}

/// Compute several percentiles of `values`, sorting the input once.
///
/// The output has one entry per requested level, in the same order.
///
/// # Errors
///
/// Same conditions as [`percentile`].
pub fn percentiles(values: &[f64], pcts: &[f64]) -> Result<Vec<f64>> {
    let sorted = sorted_finite(values)?;
    pcts.iter().map(|&p| interpolate(&sorted, p)).collect()
}

fn sorted_finite(values: &[f64]) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(ParesError::InsufficientData(
            "percentile of an empty series".to_string(),
        ));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(ParesError::InvalidData(format!(
            "non-finite value {bad} in percentile input"
        )));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

fn interpolate(sorted: &[f64], pct: f64) -> Result<f64> {
    if !(0.0..=100.0).contains(&pct) {
        return Err(ParesError::InvalidConfig(format!(
            "percentile {pct} outside [0, 100]"
        )));
    }

    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RETURNS: [f64; 7] = [0.01, -0.02, 0.03, -0.01, 0.02, -0.03, 0.04];

    #[test]
    fn test_tail_percentiles_interpolate_between_order_statistics() {
        // sorted: -0.03 -0.02 -0.01 0.01 0.02 0.03 0.04
        // p1 at rank 0.06, p99 at rank 5.94
        assert_relative_eq!(percentile(&RETURNS, 1.0).unwrap(), -0.0294, epsilon = 1e-12);
        assert_relative_eq!(percentile(&RETURNS, 99.0).unwrap(), 0.0394, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_bounds_are_min_and_max() {
        assert_relative_eq!(percentile(&RETURNS, 0.0).unwrap(), -0.03);
        assert_relative_eq!(percentile(&RETURNS, 100.0).unwrap(), 0.04);
        assert_relative_eq!(percentile(&RETURNS, 50.0).unwrap(), 0.01);
    }

    #[test]
    fn test_percentiles_matches_single_calls() {
        let both = percentiles(&RETURNS, &[1.0, 99.0]).unwrap();
        assert_eq!(both.len(), 2);
        assert_relative_eq!(both[0], percentile(&RETURNS, 1.0).unwrap());
        assert_relative_eq!(both[1], percentile(&RETURNS, 99.0).unwrap());
    }

    #[test]
    fn test_single_value() {
        assert_relative_eq!(percentile(&[0.05], 1.0).unwrap(), 0.05);
        assert_relative_eq!(percentile(&[0.05], 99.0).unwrap(), 0.05);
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(matches!(
            percentile(&[], 1.0),
            Err(ParesError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_non_finite_input_is_error() {
        assert!(matches!(
            percentile(&[0.1, f64::NAN], 1.0),
            Err(ParesError::InvalidData(_))
        ));
    }

    #[test]
    fn test_level_out_of_range_is_error() {
        assert!(percentile(&RETURNS, 101.0).is_err());
        assert!(percentile(&RETURNS, -1.0).is_err());
    }
}
