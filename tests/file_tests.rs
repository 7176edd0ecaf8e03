//! `shq file` end-to-end tests

mod common;

use common::{shq, write_csv, MEASUREMENTS_CSV};
use predicates::prelude::*;
use tempfile::TempDir;

fn setup() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_csv(&tmp, "m.csv", MEASUREMENTS_CSV);
    tmp
}

// ============================================================================
// Columns
// ============================================================================

#[test]
fn test_file_columns_table() {
    let tmp = setup();

    shq(&tmp)
        .args(["file", "columns", "m.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("diameter"))
        .stdout(predicate::str::contains("operator"))
        .stdout(predicate::str::contains("10.02"))
        .stderr(predicate::str::contains("4 rows, 4 columns (2 numeric)"));
}

#[test]
fn test_file_columns_json_marks_numeric_columns() {
    let tmp = setup();

    let output = shq(&tmp)
        .args(["file", "columns", "m.csv", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let columns: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let columns = columns.as_array().unwrap();
    assert_eq!(columns.len(), 4);

    assert_eq!(columns[0]["name"], "part");
    assert_eq!(columns[0]["numeric"], false);
    assert!(columns[0].get("summary").is_none());

    assert_eq!(columns[3]["name"], "weight");
    assert_eq!(columns[3]["numeric"], true);
    assert_eq!(columns[3]["summary"]["count"], 3);
    assert_eq!(columns[3]["summary"]["max"], 5.3);
}

// ============================================================================
// Rows
// ============================================================================

#[test]
fn test_file_rows_search_is_case_insensitive() {
    let tmp = setup();

    shq(&tmp)
        .args(["file", "rows", "m.csv", "--search", "ANA", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "part,diameter,operator,weight\nA-1,10.02,ana,5.1\nA-3,n/a,ana,5.3\n",
        ));
}

#[test]
fn test_file_rows_pagination() {
    let tmp = setup();

    shq(&tmp)
        .args(["file", "rows", "m.csv", "--per-page", "1", "--page", "2", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::eq("part,diameter,operator,weight\nA-2,9.98,luis,\n"))
        .stderr(predicate::str::contains("page 2 of 4"));
}

#[test]
fn test_file_rows_no_match() {
    let tmp = setup();

    shq(&tmp)
        .args(["file", "rows", "m.csv", "--search", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No rows found."));
}

#[test]
fn test_file_rows_json_keyed_by_header() {
    let tmp = setup();

    let output = shq(&tmp)
        .args(["file", "rows", "m.csv", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 4);
    assert_eq!(rows[3]["operator"], "Marta");
}

#[test]
fn test_file_rows_page_zero_fails() {
    let tmp = setup();

    shq(&tmp)
        .args(["file", "rows", "m.csv", "--page", "0"])
        .assert()
        .failure();
}

// ============================================================================
// Trend
// ============================================================================

#[test]
fn test_file_trend_non_numeric_cells_read_as_zero() {
    let tmp = setup();

    shq(&tmp)
        .args(["file", "trend", "m.csv", "--column", "weight", "-n", "2", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::eq("label,value\nA-1,5.1\nA-2,0\n"));
}

#[test]
fn test_file_trend_defaults_to_first_numeric_column() {
    let tmp = setup();

    shq(&tmp)
        .args(["file", "trend", "m.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("diameter"))
        .stdout(predicate::str::contains("10.05"));
}

#[test]
fn test_file_trend_unknown_column_fails() {
    let tmp = setup();

    shq(&tmp)
        .args(["file", "trend", "m.csv", "--column", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown column"));
}
