use assert_cmd::Command;
use osrmc::fingerprint::{fingerprint_path, Fingerprint, DATASET_MAJOR};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create an osrmc command
fn osrmc_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("osrmc"))
}

#[test]
fn test_help() {
    osrmc_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Companion tool for the osrmc C interface"));
}

#[test]
fn test_version() {
    osrmc_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("osrmc 6.0.0"));
}

#[test]
fn test_fingerprint_then_validate() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("berlin.osrm");

    osrmc_cmd()
        .arg("fingerprint")
        .arg(&base)
        .arg("--engine-version")
        .arg("6.1.0")
        .assert()
        .success()
        .stdout(predicate::str::contains("6.1.0"));
    assert_eq!(fs::read(fingerprint_path(&base)).unwrap().len(), 8);

    osrmc_cmd()
        .arg("validate")
        .arg(&base)
        .assert()
        .success()
        .stdout(predicate::str::contains("VALIDATION PASSED"));
}

#[test]
fn test_validate_json_output() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("berlin.osrm");
    Fingerprint::new(DATASET_MAJOR, 0, 0).write_for(&base).unwrap();

    let output = osrmc_cmd()
        .arg("validate")
        .arg(&base)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["is_valid"], true);
    assert_eq!(report["version"], "6.0.0");
}

#[test]
fn test_validate_incompatible_dataset_fails() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("old.osrm");
    Fingerprint::new(5, 27, 1).write_for(&base).unwrap();

    osrmc_cmd()
        .arg("validate")
        .arg(&base)
        .assert()
        .failure()
        .stdout(predicate::str::contains("VALIDATION FAILED"))
        .stdout(predicate::str::contains("5.27.1"));
}

#[test]
fn test_validate_missing_dataset_fails() {
    let dir = TempDir::new().unwrap();
    osrmc_cmd()
        .arg("validate")
        .arg(dir.path().join("nowhere.osrm"))
        .arg("--json")
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"is_valid\": false"));
}

#[test]
fn test_fingerprint_rejects_bad_version() {
    let dir = TempDir::new().unwrap();
    osrmc_cmd()
        .arg("fingerprint")
        .arg(dir.path().join("berlin.osrm"))
        .arg("--engine-version")
        .arg("six")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MAJOR.MINOR.PATCH"));
}

#[test]
fn test_config_document() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("berlin.osrm");
    Fingerprint::new(DATASET_MAJOR, 0, 0).write_for(&base).unwrap();

    let output = osrmc_cmd()
        .arg("config")
        .arg(&base)
        .arg("--algorithm")
        .arg("mld")
        .arg("--disable")
        .arg("route_steps")
        .arg("--max-locations-viaroute")
        .arg("25")
        .output()
        .unwrap();
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["algorithm"], "MLD");
    assert_eq!(doc["max_locations_viaroute"], 25);
    assert_eq!(doc["use_shared_memory"], false);
    assert_eq!(doc["disable_feature_dataset"][0], "ROUTE_STEPS");
}

#[test]
fn test_config_shared_memory() {
    osrmc_cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"use_shared_memory\": true"));
}

#[test]
fn test_config_rejects_unknown_algorithm() {
    osrmc_cmd()
        .arg("config")
        .arg("--algorithm")
        .arg("dijkstra")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid algorithm"));
}

#[test]
fn test_params_route_document() {
    let output = osrmc_cmd()
        .arg("params")
        .arg("route")
        .arg("-c")
        .arg("13.388860,52.517037")
        .arg("-c")
        .arg("13.397634,52.529407")
        .output()
        .unwrap();
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["service"], "route");
    assert_eq!(doc["format"], "json");
    assert_eq!(doc["coordinates"][1][0], 13.397634);
}

#[test]
fn test_params_too_few_coordinates() {
    osrmc_cmd()
        .arg("params")
        .arg("route")
        .arg("-c")
        .arg("13.388860,52.517037")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2"));

    osrmc_cmd()
        .arg("params")
        .arg("route")
        .arg("-c")
        .arg("13.388860,52.517037")
        .arg("--no-validate")
        .assert()
        .success();
}

#[test]
fn test_params_binary_only_for_tile() {
    osrmc_cmd()
        .arg("params")
        .arg("table")
        .arg("-c")
        .arg("13.388860,52.517037")
        .arg("--format")
        .arg("binary")
        .assert()
        .failure();

    osrmc_cmd()
        .arg("params")
        .arg("tile")
        .arg("--format")
        .arg("binary")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"service\": \"tile\""));
}
