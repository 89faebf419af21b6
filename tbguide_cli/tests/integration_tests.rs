//! Integration tests for the tbguide binary.
//!
//! These tests verify end-to-end behavior including:
//! - Dosage computation for every formulation
//! - Weight input validation
//! - Quiz scoring and feedback tiers
//! - Viewer state persistence

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("tbguide"))
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Tuberculosis treatment reference tool",
        ));
}

#[test]
fn test_dose_adult_hrze_70kg() {
    cli()
        .args(["dose", "--weight", "70", "--age", "adult", "--form", "hrze"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 comprimé(s) par jour"))
        .stdout(predicate::str::contains("HRZE Adulte"))
        .stdout(predicate::str::contains("pyridoxine"));
}

#[test]
fn test_dose_adult_hr_same_bands_as_hrze() {
    cli()
        .args(["dose", "--weight", "22", "--age", "adult", "--form", "hr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HR Adulte"))
        .stdout(predicate::str::contains("1.5 comprimé(s) par jour"));
}

#[test]
fn test_dose_child_hrze_below_4kg() {
    cli()
        .args(["dose", "--weight", "3.5", "--age", "child", "--form", "hrze"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Posologie calculée en fonction du poids",
        ))
        .stdout(predicate::str::contains("70 mg/jour (si indiqué)"));
}

#[test]
fn test_dose_child_hr_has_no_ethambutol() {
    let output = cli()
        .args(["dose", "--weight", "3.5", "--age", "child", "--form", "hr"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8_lossy(&output);
    assert!(!stdout.contains("Éthambutol"));
}

#[test]
fn test_dose_adult_separate_90kg_caps() {
    cli()
        .args([
            "dose", "--weight", "90", "--age", "adult", "--form", "separate",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Isoniazide: 300 mg/jour"))
        .stdout(predicate::str::contains("Rifampicine: 600 mg/jour"))
        .stdout(predicate::str::contains("Pyrazinamide: 2700 mg/jour"))
        .stdout(predicate::str::contains("Éthambutol: 1800 mg/jour"));
}

#[test]
fn test_dose_json_output() {
    let output = cli()
        .args([
            "dose", "--weight", "70", "--age", "adult", "--form", "hrze", "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout should be valid JSON");
    assert_eq!(parsed["lines"][0]["value"]["tablets"], "4");
    assert!(parsed["advisory"]
        .as_str()
        .unwrap()
        .contains("pyridoxine"));
}

#[test]
fn test_dose_rejects_non_numeric_weight() {
    cli()
        .args(["dose", "--weight", "abc", "--age", "adult"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Veuillez entrer un poids valide"));
}

#[test]
fn test_dose_rejects_zero_weight() {
    cli()
        .args(["dose", "--weight", "0", "--age", "adult"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Veuillez entrer un poids valide"));
}

#[test]
fn test_dose_rejects_unknown_age() {
    cli()
        .args(["dose", "--weight", "70", "--age", "teenager"])
        .assert()
        .failure();
}

#[test]
fn test_quiz_all_correct_is_excellent() {
    cli()
        .args(["quiz", "--auto-correct"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score : 6/6 (100%)"))
        .stdout(predicate::str::contains("Excellent"));
}

#[test]
fn test_quiz_all_wrong_recommends_review() {
    // The first option is never the correct answer in the built-in quiz
    cli()
        .args(["quiz", "--auto-answer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score : 0/6 (0%)"))
        .stdout(predicate::str::contains("revoir le guide"));
}

#[test]
fn test_quiz_auto_flags_conflict() {
    cli()
        .args(["quiz", "--auto-answer", "--auto-correct"])
        .assert()
        .failure();
}

#[test]
fn test_sections_listing() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("sections")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Épidémiologie"))
        .stdout(predicate::str::contains("Calculateur"));
}

#[test]
fn test_default_command_lists_sections() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz"));
}

#[test]
fn test_view_section_persists_marker() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["sections", "--view", "calculateur"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Section marquée comme consultée"));

    // Marker file written with the section slug
    let state_raw = fs::read_to_string(temp_dir.path().join("viewer.json"))
        .expect("viewer.json should exist");
    assert!(state_raw.contains("calculateur"));

    // Listing shows the marker on a later run
    cli()
        .arg("sections")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("dernière section consultée"));
}

#[test]
fn test_view_unknown_section_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["sections", "--view", "nope"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Section inconnue"));
}
