//! Integration tests for the nira binary.
//!
//! These tests verify end-to-end behavior including:
//! - Validation failures surfacing on stderr with a non-zero exit
//! - Derived values for person records
//! - Unit normalization of measurements
//! - Config file and `--json` output selection

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI binary, isolated from any user config
fn cli(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nira"));
    cmd.env("XDG_CONFIG_HOME", temp_dir.path().join("config"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_file(temp_dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write test file");
    path
}

const JOHN: &str = r#"{
    "name": "  John Doe  ",
    "gender": "male",
    "date_of_birth": "15-05-1990",
    "weight": 75.0,
    "height": 175.0
}"#;

fn measurement(value: f64, unit: &str) -> String {
    format!(
        r#"{{"measurement_date": "2023-10-01", "measurement_time": "08:30:00", "value": {}, "unit": "{}"}}"#,
        value, unit
    )
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();
    cli(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Validate body attribute and measurement records",
        ));
}

#[test]
fn test_human_text_report() {
    let temp_dir = setup_test_dir();
    let file = write_file(&temp_dir, "john.json", JOHN);

    cli(&temp_dir)
        .arg("human")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("John Doe"))
        .stdout(predicate::str::contains("15-05-1990"))
        .stdout(predicate::str::contains("24.49 (Normal weight)"));
}

#[test]
fn test_human_json_report() {
    let temp_dir = setup_test_dir();
    let file = write_file(&temp_dir, "john.json", JOHN);

    let output = cli(&temp_dir)
        .arg("human")
        .arg(&file)
        .arg("--json")
        .output()
        .expect("Failed to run nira");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output is not JSON");
    assert_eq!(report["name"], "John Doe");
    assert_eq!(report["gender"], "male");
    assert_eq!(report["date_of_birth"], "15-05-1990");
    assert_eq!(report["bmi"], 24.49);
    assert_eq!(report["bmi_category"], "Normal weight");
    assert!(report["age"].as_u64().unwrap() >= 34);
}

#[test]
fn test_human_whitespace_name_rejected() {
    let temp_dir = setup_test_dir();
    let file = write_file(
        &temp_dir,
        "blank.json",
        r#"{"name": "   ", "gender": "male", "date_of_birth": "15-05-1990", "weight": 75.0, "height": 175.0}"#,
    );

    cli(&temp_dir)
        .arg("human")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Name cannot be empty or just whitespace",
        ));
}

#[test]
fn test_human_future_birth_rejected() {
    let temp_dir = setup_test_dir();
    let file = write_file(
        &temp_dir,
        "future.json",
        r#"{"name": "Baby", "gender": "female", "date_of_birth": "01-01-3000", "weight": 3.5, "height": 50.0}"#,
    );

    cli(&temp_dir)
        .arg("human")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Date of birth cannot be later than today",
        ));
}

#[test]
fn test_human_from_stdin() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .arg("human")
        .arg("-")
        .write_stdin(JOHN)
        .assert()
        .success()
        .stdout(predicate::str::contains("John Doe"));
}

#[test]
fn test_missing_file_fails() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .arg("human")
        .arg(temp_dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_body_shape_normalizes_to_cm() {
    let temp_dir = setup_test_dir();
    let file = write_file(
        &temp_dir,
        "body.json",
        &format!(r#"{{"waist_circumference": {}}}"#, measurement(30.0, "in")),
    );

    let output = cli(&temp_dir)
        .arg("body-shape")
        .arg(&file)
        .arg("--json")
        .output()
        .expect("Failed to run nira");
    assert!(output.status.success());

    let body: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output is not JSON");
    let waist = &body["waist_circumference"];
    assert_eq!(waist["unit"], "cm");
    assert!((waist["value"].as_f64().unwrap() - 76.2).abs() < 0.1);
    assert!(body.get("neck_circumference").is_none());
}

#[test]
fn test_body_shape_text_output() {
    let temp_dir = setup_test_dir();
    let file = write_file(
        &temp_dir,
        "body.json",
        &format!(
            r#"{{"neck_circumference": {}, "hip_circumference": {}}}"#,
            measurement(40.0, "cm"),
            measurement(90.0, "cm")
        ),
    );

    cli(&temp_dir)
        .arg("body-shape")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Neck circumference:"))
        .stdout(predicate::str::contains("40.00 cm"))
        .stdout(predicate::str::contains("90.00 cm"));
}

#[test]
fn test_body_shape_empty() {
    let temp_dir = setup_test_dir();
    let file = write_file(&temp_dir, "body.json", "{}");

    cli(&temp_dir)
        .arg("body-shape")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("No circumferences recorded"));
}

#[test]
fn test_body_shape_neck_out_of_range() {
    let temp_dir = setup_test_dir();
    let file = write_file(
        &temp_dir,
        "body.json",
        &format!(r#"{{"neck_circumference": {}}}"#, measurement(61.0, "cm")),
    );

    cli(&temp_dir)
        .arg("body-shape")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Neck circumference must be between 8 cm and 60 cm",
        ));
}

#[test]
fn test_weight_normalized() {
    let temp_dir = setup_test_dir();
    let file = write_file(&temp_dir, "weight.json", &measurement(100.0, "lb"));

    cli(&temp_dir)
        .arg("weight")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("100 lb = 45.36 kg"));
}

#[test]
fn test_weight_out_of_range() {
    let temp_dir = setup_test_dir();
    let file = write_file(&temp_dir, "weight.json", &measurement(151.0, "kg"));

    cli(&temp_dir)
        .arg("weight")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Weight value must be"));
}

#[test]
fn test_length_rejects_unknown_unit() {
    let temp_dir = setup_test_dir();
    let file = write_file(&temp_dir, "length.json", &measurement(180.0, "km"));

    cli(&temp_dir)
        .arg("length")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unit must be one of: cm, m, in, ft"));
}

#[test]
fn test_convert_units() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["convert", "100", "lb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("45.36 kg"));

    cli(&temp_dir)
        .args(["convert", "60", "ft"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1828.80 cm"));
}

#[test]
fn test_convert_json() {
    let temp_dir = setup_test_dir();

    let output = cli(&temp_dir)
        .args(["convert", "70", "in", "--json"])
        .output()
        .expect("Failed to run nira");
    assert!(output.status.success());

    let conversion: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output is not JSON");
    assert_eq!(conversion["unit"], "cm");
    assert!((conversion["value"].as_f64().unwrap() - 177.8).abs() < 0.001);
}

#[test]
fn test_convert_unsupported_unit() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["convert", "1", "ton"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unsupported unit for measurement conversion: ton",
        ));
}

#[test]
fn test_config_file_selects_output() {
    let temp_dir = setup_test_dir();
    let config = write_file(
        &temp_dir,
        "config.toml",
        "[output]\nformat = \"json\"\nprecision = 1\n",
    );

    cli(&temp_dir)
        .arg("--config")
        .arg(&config)
        .args(["convert", "100", "g"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"unit\": \"kg\""));
}

#[test]
fn test_default_config_location_is_used() {
    let temp_dir = setup_test_dir();
    let config_dir = temp_dir.path().join("config").join("nira");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[output]\nprecision = 1\n").unwrap();

    cli(&temp_dir)
        .args(["convert", "100", "lb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("45.4 kg"));
}
