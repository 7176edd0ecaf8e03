//! Six Sigma calculator: DPMO / sigma level and process capability indices
//!
//! Both paths are plain arithmetic on user-supplied scalars. Degenerate
//! inputs (zero units, zero sigma) are never rejected; they produce
//! non-finite results that the caller displays as-is.

use serde::{Deserialize, Serialize};

/// Inputs to the DPMO path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DpmoInputs {
    /// Defects observed
    pub defects: f64,
    /// Defect opportunities per unit
    pub opportunities: f64,
    /// Units inspected
    pub units: f64,
}

/// Result of the DPMO path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DpmoResult {
    /// Defects per unit
    pub dpu: f64,
    /// Defects per million opportunities
    pub dpmo: f64,
    /// Process yield in percent, `(1 - dpu) * 100`
    pub process_yield: f64,
    /// Approximate short-term sigma level (NaN when undefined)
    pub sigma_level: f64,
}

/// Inputs to the process capability path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapabilityInputs {
    pub mean: f64,
    pub std_dev: f64,
    /// Lower specification limit
    pub lsl: f64,
    /// Upper specification limit
    pub usl: f64,
    /// Nominal target. Recorded with the inputs; no index uses it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
}

/// Process capability indices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapabilityResult {
    pub cp: f64,
    pub cpu: f64,
    pub cpl: f64,
    pub cpk: f64,
    /// Same formula as Cp: short- and long-term sigma are not distinguished
    pub pp: f64,
}

/// Sigma level approximation: `0.8406 + sqrt(29.37 - 2.221 * ln(dpmo))`
///
/// Returns NaN when the approximation is undefined: `dpmo <= 0` (no
/// logarithm) or `dpmo` above roughly 553,365 (negative radicand).
pub fn sigma_level(dpmo: f64) -> f64 {
    if dpmo.is_nan() || dpmo <= 0.0 {
        return f64::NAN;
    }
    // sqrt of a negative radicand is NaN already
    0.8406 + (29.37 - 2.221 * dpmo.ln()).sqrt()
}

/// Run the DPMO path
pub fn calculate_dpmo(inputs: &DpmoInputs) -> DpmoResult {
    let dpu = inputs.defects / inputs.units;
    let dpmo = inputs.defects / (inputs.opportunities * inputs.units) * 1_000_000.0;

    DpmoResult {
        dpu,
        dpmo,
        process_yield: (1.0 - dpu) * 100.0,
        sigma_level: sigma_level(dpmo),
    }
}

/// Run the process capability path
pub fn calculate_process_capability(inputs: &CapabilityInputs) -> CapabilityResult {
    let sigma = inputs.std_dev;
    let spread = inputs.usl - inputs.lsl;

    let cp = spread / (6.0 * sigma);
    let cpu = (inputs.usl - inputs.mean) / (3.0 * sigma);
    let cpl = (inputs.mean - inputs.lsl) / (3.0 * sigma);

    CapabilityResult {
        cp,
        cpu,
        cpl,
        cpk: nan_min(cpu, cpl),
        pp: spread / (6.0 * sigma),
    }
}

/// `min` that returns NaN if either side is NaN (`f64::min` would hide it)
fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dpmo_reference_example() {
        let result = calculate_dpmo(&DpmoInputs {
            defects: 3.0,
            opportunities: 1.0,
            units: 1000.0,
        });
        assert!((result.dpu - 0.003).abs() < 1e-12);
        assert!((result.dpmo - 3000.0).abs() < 1e-9);
        assert!((result.process_yield - 99.7).abs() < 1e-9);
        assert!((result.sigma_level - 4.244694245500381).abs() < 1e-9);
    }

    #[test]
    fn test_sigma_level_zero_dpmo_is_nan() {
        assert!(sigma_level(0.0).is_nan());
        let result = calculate_dpmo(&DpmoInputs {
            defects: 0.0,
            opportunities: 5.0,
            units: 100.0,
        });
        assert_eq!(result.dpmo, 0.0);
        assert_eq!(result.process_yield, 100.0);
        assert!(result.sigma_level.is_nan());
    }

    #[test]
    fn test_sigma_level_negative_radicand_is_nan() {
        assert!(sigma_level(600_000.0).is_nan());
        assert!(sigma_level(500_000.0).is_finite());
    }

    #[test]
    fn test_dpmo_zero_units_is_not_finite() {
        let result = calculate_dpmo(&DpmoInputs {
            defects: 2.0,
            opportunities: 1.0,
            units: 0.0,
        });
        assert!(!result.dpu.is_finite());
        assert!(!result.dpmo.is_finite());
        assert!(result.sigma_level.is_nan());
    }

    #[test]
    fn test_capability_reference_example() {
        let result = calculate_process_capability(&CapabilityInputs {
            mean: 10.0,
            std_dev: 1.0,
            lsl: 7.0,
            usl: 13.0,
            target: Some(10.0),
        });
        assert_eq!(result.cp, 1.0);
        assert_eq!(result.cpu, 1.0);
        assert_eq!(result.cpl, 1.0);
        assert_eq!(result.cpk, 1.0);
        assert_eq!(result.pp, 1.0);
    }

    #[test]
    fn test_capability_off_center_uses_nearest_limit() {
        let result = calculate_process_capability(&CapabilityInputs {
            mean: 11.0,
            std_dev: 0.5,
            lsl: 7.0,
            usl: 13.0,
            target: None,
        });
        assert_eq!(result.cp, 2.0);
        assert!((result.cpu - 4.0 / 3.0).abs() < 1e-12);
        assert!((result.cpl - 8.0 / 3.0).abs() < 1e-12);
        assert_eq!(result.cpk, result.cpu);
        assert_eq!(result.pp, result.cp);
    }

    #[test]
    fn test_capability_target_does_not_change_indices() {
        let base = CapabilityInputs {
            mean: 10.0,
            std_dev: 2.0,
            lsl: 4.0,
            usl: 18.0,
            target: None,
        };
        let with_target = CapabilityInputs {
            target: Some(15.0),
            ..base
        };
        assert_eq!(
            calculate_process_capability(&base),
            calculate_process_capability(&with_target)
        );
    }

    #[test]
    fn test_capability_zero_sigma_is_non_numeric() {
        let result = calculate_process_capability(&CapabilityInputs {
            mean: 10.0,
            std_dev: 0.0,
            lsl: 7.0,
            usl: 13.0,
            target: None,
        });
        assert!(!result.cp.is_finite());
        assert!(!result.cpk.is_finite());
        assert!(!result.pp.is_finite());
    }

    #[test]
    fn test_capability_nan_propagates_through_cpk() {
        let result = calculate_process_capability(&CapabilityInputs {
            mean: 13.0,
            std_dev: 0.0,
            lsl: 7.0,
            usl: 13.0,
            target: None,
        });
        // (USL - mean) / 0 = 0 / 0
        assert!(result.cpu.is_nan());
        assert!(result.cpk.is_nan());
    }
}
