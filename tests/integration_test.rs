//! Integration tests for the trip-settle CLI.
//!
//! These tests run the actual binary and verify output against expected CSV files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Run the binary with the given arguments and return stdout
fn run_cli(args: &[&str]) -> String {
    let mut cmd = Command::cargo_bin("trip-settle").unwrap();
    let assert = cmd.args(args).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

/// Write a trip snapshot to a temporary file
fn trip_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn expected(filename: &str) -> String {
    fs::read_to_string(test_data_path(filename)).unwrap()
}

#[test]
fn test_default_report_is_settlements() {
    let output = run_cli(&[test_data_path("road_trip.json").as_str()]);
    assert_eq!(output, expected("expected_road_trip_settlements.csv"));
}

#[test]
fn test_settlements_report() {
    let output = run_cli(&[test_data_path("road_trip.json").as_str(), "settlements"]);
    assert_eq!(output, expected("expected_road_trip_settlements.csv"));
}

#[test]
fn test_balances_report() {
    let output = run_cli(&[test_data_path("road_trip.json").as_str(), "balances"]);
    assert_eq!(output, expected("expected_road_trip_balances.csv"));
}

#[test]
fn test_summary_report() {
    let output = run_cli(&[test_data_path("road_trip.json").as_str(), "summary"]);
    assert_eq!(output, expected("expected_road_trip_summary.csv"));
}

#[test]
fn test_trip_without_expenses() {
    let file = trip_file(r#"{"name": "Quiet", "travelers": ["A", "B"], "expenses": []}"#);
    let path = file.path().to_str().unwrap();

    assert_eq!(run_cli(&[path]), "from,to,amount\n");
    assert_eq!(
        run_cli(&[path, "balances"]),
        "traveler,paid,owed,balance\nA,0.00,0.00,0.00\nB,0.00,0.00,0.00\n"
    );
}

#[test]
fn test_unbalanced_trip_still_reports() {
    let file = trip_file(
        r#"{"travelers": ["A", "B"], "expenses": [
            {"title": "Short", "amount": 100, "payers": [{"name": "A", "amount": 70}]}
        ]}"#,
    );

    let output = run_cli(&[file.path().to_str().unwrap()]);

    assert_eq!(output, "from,to,amount\nB,A,20.00\n");
}

#[test]
fn test_missing_file_error() {
    let mut cmd = Command::cargo_bin("trip-settle").unwrap();
    cmd.arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("Error")));
}

#[test]
fn test_missing_argument_error() {
    let mut cmd = Command::cargo_bin("trip-settle").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing input file"));
}

#[test]
fn test_unknown_report_error() {
    let mut cmd = Command::cargo_bin("trip-settle").unwrap();
    cmd.args([test_data_path("road_trip.json").as_str(), "totals"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown report"));
}

#[test]
fn test_invalid_json_error() {
    let file = trip_file(r#"{"travelers": null}"#);

    let mut cmd = Command::cargo_bin("trip-settle").unwrap();
    cmd.arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid trip JSON"));
}

#[test]
fn test_duplicate_traveler_error() {
    let file = trip_file(r#"{"travelers": ["Ana", "Ana"]}"#);

    let mut cmd = Command::cargo_bin("trip-settle").unwrap();
    cmd.arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate traveler"));
}

#[test]
fn test_amounts_have_two_decimal_places() {
    let output = run_cli(&[test_data_path("road_trip.json").as_str(), "balances"]);

    for line in output.lines().skip(1) {
        let parts: Vec<&str> = line.split(',').collect();
        for part in &parts[1..4] {
            let decimals = part.split('.').nth(1).unwrap();
            assert_eq!(decimals.len(), 2, "Expected 2 decimal places in: {}", part);
        }
    }
}
