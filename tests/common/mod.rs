//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Measurements with a label column, one text column and a sparse column
pub const MEASUREMENTS_CSV: &str = "\
part,diameter,operator,weight
A-1,10.02,ana,5.1
A-2,9.98,luis,
A-3,n/a,ana,5.3
A-4,10.05,Marta,5.0
";

/// Helper to get an shq command isolated from the user's config and env
pub fn shq(tmp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("shq"));
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"))
        .env_remove("SHQ_FORMAT")
        .env_remove("SHQ_DEFECTS");
    cmd
}

/// Helper to write a CSV file into the temp directory
pub fn write_csv(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Helper to record a defect, returning its short ID
pub fn create_test_defect(tmp: &TempDir, process: &str, description: &str) -> String {
    let output = shq(tmp)
        .args([
            "defect",
            "new",
            "--process",
            process,
            "--description",
            description,
        ])
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .split_whitespace()
        .find(|w| w.starts_with("DEF@"))
        .map(String::from)
        .unwrap_or_default()
}
