//! Descriptive statistics and process-capability engine
//!
//! Pure functions over samples of `f64`. Nothing in this module performs I/O
//! or holds state: every call takes its inputs explicitly and returns a fresh
//! result record.
//!
//! Division by zero (zero mean, zero standard deviation) is not treated as an
//! error. It propagates as a non-finite value, which the display layer in
//! [`format`] renders verbatim. The only hard failure is an empty sample.

pub mod capability;
pub mod descriptive;
pub mod format;
pub mod histogram;
pub mod normality;

use thiserror::Error;

pub use capability::{
    calculate_dpmo, calculate_process_capability, sigma_level, CapabilityInputs,
    CapabilityResult, DpmoInputs, DpmoResult,
};
pub use descriptive::{describe, median, median_lower_middle, mode, DescriptiveStats};
pub use format::{fixed, FormattedCapability, FormattedDpmo, FormattedNormality, FormattedStats};
pub use histogram::{histogram, HistogramBin, HISTOGRAM_BINS};
pub use normality::{assess_normality, NormalityAssessment};

/// Errors raised by the statistics engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("Sample is empty: at least one numeric observation is required")]
    EmptySample,
}

/// Population mean. Caller guarantees a non-empty slice.
pub(crate) fn mean_of(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by n, not n - 1)
pub(crate) fn population_variance(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Sorted ascending copy of a sample
pub(crate) fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}
