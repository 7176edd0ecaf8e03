//! Descriptive statistics for a single sample
//!
//! Quartiles use the simple positional method (`sorted[n/4]`,
//! `sorted[3n/4]`) rather than an interpolated quantile. Results for small
//! samples are coarse, but they match the figures the dashboard has always
//! shown, so they are reproduced exactly.

use serde::{Deserialize, Serialize};

use super::{mean_of, population_variance, sorted_copy, StatsError};

/// Summary statistics derived from one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// First value (ascending) among the most frequent ones
    pub mode: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Population variance (divides by n)
    pub variance: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    /// Coefficient of variation in percent; non-finite when the mean is zero
    pub cv: f64,
    /// Sample size
    pub n: usize,
    /// Observations outside the 1.5 x IQR fences
    pub outliers: usize,
}

impl DescriptiveStats {
    /// Lower and upper Tukey fences: `Q1 - 1.5 IQR`, `Q3 + 1.5 IQR`
    pub fn outlier_fences(&self) -> (f64, f64) {
        (self.q1 - 1.5 * self.iqr, self.q3 + 1.5 * self.iqr)
    }

    /// Whether a value lies outside the outlier fences
    pub fn is_outlier(&self, value: f64) -> bool {
        let (lower, upper) = self.outlier_fences();
        value < lower || value > upper
    }
}

/// Compute descriptive statistics for a sample
///
/// The input order is not modified; a sorted copy is used for the
/// order-based statistics.
///
/// # Errors
///
/// Returns [`StatsError::EmptySample`] when `values` is empty.
pub fn describe(values: &[f64]) -> Result<DescriptiveStats, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptySample);
    }

    let sorted = sorted_copy(values);
    let n = sorted.len();

    let mean = mean_of(values);
    let variance = population_variance(values, mean);
    let std_dev = variance.sqrt();

    let q1 = sorted[n / 4];
    let q3 = sorted[(3 * n) / 4];
    let iqr = q3 - q1;

    let cv = (std_dev / mean) * 100.0;

    let lower = q1 - 1.5 * iqr;
    let upper = q3 + 1.5 * iqr;
    let outliers = values.iter().filter(|&&x| x < lower || x > upper).count();

    Ok(DescriptiveStats {
        min: sorted[0],
        max: sorted[n - 1],
        mean,
        median: median_of_sorted(&sorted),
        mode: mode_of_sorted(&sorted),
        std_dev,
        variance,
        q1,
        q3,
        iqr,
        cv,
        n,
        outliers,
    })
}

/// Median: the middle element for odd n, the mean of the two central
/// elements for even n
pub fn median(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptySample);
    }
    Ok(median_of_sorted(&sorted_copy(values)))
}

/// Lower-middle "median": always `sorted[n / 2]`, even for even n
///
/// This is the shortcut the quick file summary historically used. It is kept
/// only so the two figures can be compared; [`median`] is the rule used by
/// every statistic this crate reports.
pub fn median_lower_middle(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptySample);
    }
    let sorted = sorted_copy(values);
    Ok(sorted[sorted.len() / 2])
}

/// Mode with a deterministic tie-break: the smallest of the most frequent values
pub fn mode(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptySample);
    }
    Ok(mode_of_sorted(&sorted_copy(values)))
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Run-length scan over an ascending slice. A later run only replaces the
/// current mode when strictly longer, so ties keep the first value.
fn mode_of_sorted(sorted: &[f64]) -> f64 {
    let mut best = sorted[0];
    let mut best_count = 0usize;

    let mut run_value = sorted[0];
    let mut run_count = 0usize;

    for &x in sorted {
        // `==` also folds -0.0 and 0.0 into a single run
        if x == run_value {
            run_count += 1;
        } else {
            run_value = x;
            run_count = 1;
        }
        if run_count > best_count {
            best = run_value;
            best_count = run_count;
        }
    }

    best
}
