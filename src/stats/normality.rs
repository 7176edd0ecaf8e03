//! Simplified normality screening
//!
//! This is a moment-based heuristic, not a hypothesis test. Skewness and
//! excess kurtosis are method-of-moments estimates (no bias correction), the
//! Jarque-Bera-like figure is `n * (S^2 / 6 + K^2 / 24)`, and a sample
//! "looks normal" when both |S| and |K| are below 0.5. No p-value is
//! produced.

use serde::{Deserialize, Serialize};

use super::{mean_of, population_variance, StatsError};

/// Threshold applied to both |skewness| and |excess kurtosis|
pub const NORMALITY_THRESHOLD: f64 = 0.5;

/// Shape statistics and the resulting normality verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalityAssessment {
    pub skewness: f64,
    /// Excess kurtosis (normal = 0)
    pub kurtosis: f64,
    /// Simplified Jarque-Bera statistic
    pub jb_stat: f64,
    pub is_normal: bool,
}

/// Assess the shape of a sample
///
/// A zero standard deviation leaves every standardized moment undefined;
/// the resulting NaN values propagate and `is_normal` is `false`.
///
/// # Errors
///
/// Returns [`StatsError::EmptySample`] when `values` is empty.
pub fn assess_normality(values: &[f64]) -> Result<NormalityAssessment, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptySample);
    }

    let n = values.len() as f64;
    let mean = mean_of(values);
    let std_dev = population_variance(values, mean).sqrt();

    let skewness = values
        .iter()
        .map(|x| ((x - mean) / std_dev).powi(3))
        .sum::<f64>()
        / n;

    let kurtosis = values
        .iter()
        .map(|x| ((x - mean) / std_dev).powi(4))
        .sum::<f64>()
        / n
        - 3.0;

    let jb_stat = n * (skewness.powi(2) / 6.0 + kurtosis.powi(2) / 24.0);

    Ok(NormalityAssessment {
        skewness,
        kurtosis,
        jb_stat,
        is_normal: skewness.abs() < NORMALITY_THRESHOLD && kurtosis.abs() < NORMALITY_THRESHOLD,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_error() {
        assert_eq!(assess_normality(&[]), Err(StatsError::EmptySample));
    }

    #[test]
    fn test_symmetric_sample_has_zero_skew() {
        let result = assess_normality(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!(result.skewness.abs() < 1e-12);
        // z^4 mean for 1..5 is 1.7, so excess kurtosis is -1.3
        assert!((result.kurtosis + 1.3).abs() < 1e-9);
        assert!((result.jb_stat - 5.0 * (1.3_f64.powi(2) / 24.0)).abs() < 1e-9);
        // Flat tails fail the kurtosis half of the heuristic
        assert!(!result.is_normal);
    }

    #[test]
    fn test_symmetric_bell_sample_looks_normal() {
        let values = [1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 3.0, 3.0, 4.0, 4.0, 5.0];
        let result = assess_normality(&values).unwrap();
        assert!(result.skewness.abs() < 1e-12);
        assert!((result.kurtosis + 0.25).abs() < 1e-9);
        assert!(result.is_normal);
    }

    #[test]
    fn test_right_skewed_sample_is_not_normal() {
        let values = [1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 10.0];
        let result = assess_normality(&values).unwrap();
        assert!(result.skewness > NORMALITY_THRESHOLD);
        assert!(!result.is_normal);
        assert!(result.jb_stat > 0.0);
    }

    #[test]
    fn test_zero_std_dev_propagates_nan() {
        let result = assess_normality(&[3.0, 3.0, 3.0]).unwrap();
        assert!(result.skewness.is_nan());
        assert!(result.kurtosis.is_nan());
        assert!(result.jb_stat.is_nan());
        assert!(!result.is_normal);
    }
}
