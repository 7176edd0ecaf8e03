//! Fixed-decimal display of statistics results
//!
//! Decimal places: 2 for descriptive statistics, DPMO, yield and sigma level;
//! 3 for capability indices and normality figures; 4 for DPU. Non-finite
//! values are shown verbatim as `NaN`, `Infinity` or `-Infinity`.

use serde::Serialize;

use super::{CapabilityResult, DescriptiveStats, DpmoResult, NormalityAssessment};

/// Digits kept past the requested precision when deciding a rounding tie
const GUARD_DIGITS: usize = 40;

/// Format a value with a fixed number of decimals
///
/// Exact halves round away from zero (`0.125` -> `0.13`) and negative zero
/// prints unsigned.
pub fn fixed(value: f64, places: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    } else if value == f64::INFINITY {
        return "Infinity".to_string();
    } else if value == f64::NEG_INFINITY {
        return "-Infinity".to_string();
    }

    let negative = value < 0.0;
    let expanded = format!("{:.*}", places + GUARD_DIGITS, value.abs());
    let (kept, guard) = expanded.split_at(expanded.len() - GUARD_DIGITS);

    let mut digits = kept.as_bytes().to_vec();
    if guard.as_bytes()[0] >= b'5' {
        round_up(&mut digits);
    }
    if digits.last() == Some(&b'.') {
        digits.pop();
    }

    let mut out = String::with_capacity(digits.len() + 1);
    if negative {
        out.push('-');
    }
    out.extend(digits.iter().map(|&b| b as char));
    out
}

/// Add one unit in the last place of an ASCII decimal
fn round_up(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        match *d {
            b'.' => continue,
            b'9' => *d = b'0',
            _ => {
                *d += 1;
                return;
            }
        }
    }
    digits.insert(0, b'1');
}

/// Shortest round-trip rendering for values shown unrounded (min, max)
fn raw(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.is_finite() {
        format!("{}", value)
    } else {
        fixed(value, 0)
    }
}

/// Display form of [`DescriptiveStats`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedStats {
    pub min: String,
    pub max: String,
    pub mean: String,
    pub median: String,
    pub mode: String,
    pub std_dev: String,
    pub variance: String,
    pub q1: String,
    pub q3: String,
    pub iqr: String,
    pub cv: String,
    pub n: usize,
    pub outliers: usize,
}

impl From<&DescriptiveStats> for FormattedStats {
    fn from(s: &DescriptiveStats) -> Self {
        Self {
            min: raw(s.min),
            max: raw(s.max),
            mean: fixed(s.mean, 2),
            median: fixed(s.median, 2),
            mode: fixed(s.mode, 2),
            std_dev: fixed(s.std_dev, 2),
            variance: fixed(s.variance, 2),
            q1: fixed(s.q1, 2),
            q3: fixed(s.q3, 2),
            iqr: fixed(s.iqr, 2),
            cv: fixed(s.cv, 2),
            n: s.n,
            outliers: s.outliers,
        }
    }
}

impl FormattedStats {
    /// Label/value pairs in display order
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("n", self.n.to_string()),
            ("min", self.min.clone()),
            ("max", self.max.clone()),
            ("mean", self.mean.clone()),
            ("median", self.median.clone()),
            ("mode", self.mode.clone()),
            ("std dev", self.std_dev.clone()),
            ("variance", self.variance.clone()),
            ("Q1", self.q1.clone()),
            ("Q3", self.q3.clone()),
            ("IQR", self.iqr.clone()),
            ("CV %", self.cv.clone()),
            ("outliers", self.outliers.to_string()),
        ]
    }
}

/// Display form of [`NormalityAssessment`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedNormality {
    pub skewness: String,
    pub kurtosis: String,
    pub jb_stat: String,
    pub is_normal: bool,
}

impl From<&NormalityAssessment> for FormattedNormality {
    fn from(n: &NormalityAssessment) -> Self {
        Self {
            skewness: fixed(n.skewness, 3),
            kurtosis: fixed(n.kurtosis, 3),
            jb_stat: fixed(n.jb_stat, 3),
            is_normal: n.is_normal,
        }
    }
}

/// Display form of [`DpmoResult`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedDpmo {
    pub dpmo: String,
    pub dpu: String,
    pub process_yield: String,
    pub sigma_level: String,
}

impl From<&DpmoResult> for FormattedDpmo {
    fn from(r: &DpmoResult) -> Self {
        Self {
            dpmo: fixed(r.dpmo, 2),
            dpu: fixed(r.dpu, 4),
            process_yield: fixed(r.process_yield, 2),
            sigma_level: fixed(r.sigma_level, 2),
        }
    }
}

/// Display form of [`CapabilityResult`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedCapability {
    pub cp: String,
    pub cpu: String,
    pub cpl: String,
    pub cpk: String,
    pub pp: String,
}

impl From<&CapabilityResult> for FormattedCapability {
    fn from(r: &CapabilityResult) -> Self {
        Self {
            cp: fixed(r.cp, 3),
            cpu: fixed(r.cpu, 3),
            cpl: fixed(r.cpl, 3),
            cpk: fixed(r.cpk, 3),
            pp: fixed(r.pp, 3),
        }
    }
}
