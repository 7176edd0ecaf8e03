//! `shq calc` end-to-end tests

mod common;

use common::shq;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// DPMO
// ============================================================================

#[test]
fn test_calc_dpmo_table() {
    let tmp = TempDir::new().unwrap();

    shq(&tmp)
        .args([
            "calc",
            "dpmo",
            "--defects",
            "3",
            "--opportunities",
            "1",
            "--units",
            "1000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("3000.00"))
        .stdout(predicate::str::contains("0.0030"))
        .stdout(predicate::str::contains("99.70"))
        .stdout(predicate::str::contains("4.24"));
}

#[test]
fn test_calc_dpmo_json() {
    let tmp = TempDir::new().unwrap();

    let output = shq(&tmp)
        .args(["calc", "dpmo", "-d", "3", "-o", "1", "-u", "1000", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["dpmo"], "3000.00");
    assert_eq!(result["dpu"], "0.0030");
    assert_eq!(result["process_yield"], "99.70");
    assert_eq!(result["sigma_level"], "4.24");
}

#[test]
fn test_calc_dpmo_zero_defects_sigma_is_nan() {
    let tmp = TempDir::new().unwrap();

    shq(&tmp)
        .args(["calc", "dpmo", "-d", "0", "-o", "5", "-u", "100", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.00,0.0000,100.00,NaN"));
}

#[test]
fn test_calc_dpmo_zero_units_is_not_finite() {
    let tmp = TempDir::new().unwrap();

    shq(&tmp)
        .args(["calc", "dpmo", "-d", "3", "-o", "1", "-u", "0", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dpu\": \"Infinity\""));
}

#[test]
fn test_calc_dpmo_requires_all_inputs() {
    let tmp = TempDir::new().unwrap();

    shq(&tmp)
        .args(["calc", "dpmo", "--defects", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--opportunities"));
}

// ============================================================================
// Process Capability
// ============================================================================

#[test]
fn test_calc_capability_centered_process() {
    let tmp = TempDir::new().unwrap();

    shq(&tmp)
        .args([
            "calc",
            "capability",
            "--mean",
            "10",
            "--std-dev",
            "1",
            "--lsl",
            "7",
            "--usl",
            "13",
            "-f",
            "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("cp,cpk,cpu,cpl,pp"))
        .stdout(predicate::str::contains("1.000,1.000,1.000,1.000,1.000"));
}

#[test]
fn test_calc_capability_accepts_negative_limits() {
    let tmp = TempDir::new().unwrap();

    shq(&tmp)
        .args([
            "calc",
            "capability",
            "--mean",
            "0",
            "--std-dev",
            "1",
            "--lsl",
            "-3",
            "--usl",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.000"))
        .stdout(predicate::str::contains("marginal"));
}

#[test]
fn test_calc_capability_off_center_json() {
    let tmp = TempDir::new().unwrap();

    let output = shq(&tmp)
        .args([
            "calc",
            "capability",
            "--mean",
            "11",
            "--std-dev",
            "0.5",
            "--lsl",
            "7",
            "--usl",
            "13",
            "--target",
            "10",
            "-f",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["cp"], "2.000");
    assert_eq!(result["cpu"], "1.333");
    assert_eq!(result["cpl"], "2.667");
    assert_eq!(result["cpk"], "1.333");
    assert_eq!(result["target"], 10.0);
}

#[test]
fn test_calc_capability_zero_sigma_is_not_finite() {
    let tmp = TempDir::new().unwrap();

    shq(&tmp)
        .args([
            "calc",
            "capability",
            "--mean",
            "10",
            "--std-dev",
            "0",
            "--lsl",
            "7",
            "--usl",
            "13",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Infinity"));
}

#[test]
fn test_calc_capability_poor_process_verdict() {
    let tmp = TempDir::new().unwrap();

    shq(&tmp)
        .args([
            "calc",
            "capability",
            "--mean",
            "12",
            "--std-dev",
            "2",
            "--lsl",
            "7",
            "--usl",
            "13",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("not capable"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();

    shq(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shq"));
}
