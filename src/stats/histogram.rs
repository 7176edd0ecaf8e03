//! Fixed 20-bin histogram
//!
//! The sample range `[min, max]` is split into [`HISTOGRAM_BINS`] equal-width
//! bins. An observation lands in bin `floor((x - min) / width)`, clamped to
//! the last bin so that `x == max` is counted.
//!
//! When every observation has the same value the width is zero. All 20 bins
//! are still returned (each collapsed onto `min`) and every observation is
//! counted in the first bin, so frequencies always sum to the sample size.

use serde::{Deserialize, Serialize};

use super::StatsError;

/// Number of bins produced by [`histogram`]
pub const HISTOGRAM_BINS: usize = 20;

/// One histogram bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    /// Display label, `"{start:.2}-{end:.2}"`
    pub range: String,
    pub frequency: usize,
    pub midpoint: f64,
}

/// Bin a sample into [`HISTOGRAM_BINS`] ascending bins
///
/// # Errors
///
/// Returns [`StatsError::EmptySample`] when `values` is empty.
pub fn histogram(values: &[f64]) -> Result<Vec<HistogramBin>, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptySample);
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let bin_width = (max - min) / HISTOGRAM_BINS as f64;

    let mut counts = vec![0usize; HISTOGRAM_BINS];
    for &x in values {
        counts[bin_index(x, min, bin_width)] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, frequency)| {
            let start = min + i as f64 * bin_width;
            let end = min + (i + 1) as f64 * bin_width;
            HistogramBin {
                start,
                end,
                range: format!("{:.2}-{:.2}", start, end),
                frequency,
                midpoint: (start + end) / 2.0,
            }
        })
        .collect())
}

fn bin_index(x: f64, min: f64, bin_width: f64) -> usize {
    if bin_width <= 0.0 {
        return 0;
    }
    let raw = ((x - min) / bin_width).floor();
    // Float error can push `raw` just past the last bin for x == max
    (raw.max(0.0) as usize).min(HISTOGRAM_BINS - 1)
}
