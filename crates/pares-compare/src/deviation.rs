//! Absolute percentage deviation between a candidate and a target value.

use pares_traits::{Metric, ParesError, Result};

/// Absolute percentage deviation of `candidate` from `target` for `metric`.
///
/// `|candidate - target| / |target| * 100`.
///
/// # Errors
///
/// Returns [`ParesError::UndefinedDeviation`] when `target` is zero or not
/// finite, and [`ParesError::InvalidData`] when `candidate` is not finite.
pub fn deviation_pct(metric: Metric, candidate: f64, target: f64) -> Result<f64> {
    if target == 0.0 || !target.is_finite() {
        return Err(ParesError::UndefinedDeviation { metric });
    }
    if !candidate.is_finite() {
        return Err(ParesError::InvalidData(format!(
            "{metric} value {candidate} is not finite"
        )));
    }

    Ok((candidate - target).abs() / target.abs() * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identical_values_have_zero_deviation() {
        assert_eq!(deviation_pct(Metric::ReturnOnAssets, 20.55, 20.55).unwrap(), 0.0);
    }

    #[test]
    fn test_deviation_is_symmetric_around_target() {
        let above = deviation_pct(Metric::ReturnOnEquity, 150.0, 100.0).unwrap();
        let below = deviation_pct(Metric::ReturnOnEquity, 50.0, 100.0).unwrap();
        assert_relative_eq!(above, 50.0);
        assert_relative_eq!(below, 50.0);
    }

    #[test]
    fn test_negative_target_uses_absolute_denominator() {
        // -5 vs -10: |(-5) - (-10)| / |-10| * 100 = 50
        assert_relative_eq!(
            deviation_pct(Metric::ReturnOnAssets, -5.0, -10.0).unwrap(),
            50.0
        );
    }

    #[test]
    fn test_zero_target_is_undefined() {
        let err = deviation_pct(Metric::MarketCap, 1.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            ParesError::UndefinedDeviation {
                metric: Metric::MarketCap
            }
        ));
    }

    #[test]
    fn test_non_finite_candidate_is_rejected() {
        assert!(matches!(
            deviation_pct(Metric::ReturnOnAssets, f64::NAN, 1.0),
            Err(ParesError::InvalidData(_))
        ));
    }
}
