#[cfg(test)]
extern crate assert_cmd;
extern crate predicates;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use std::process::Command;
use tempfile::TempDir;

#[test]
fn test_cli() {
    let mut cmd = Command::cargo_bin("screen-recapture").expect("Calling binary failed");
    cmd.assert().failure();
}

#[test]
fn test_version() {
    let expected_version = "screen-recapture 0.1.0\n";
    let mut cmd = Command::cargo_bin("screen-recapture").expect("Calling binary failed");
    cmd.arg("--version").assert().stdout(expected_version);
}

#[test]
fn test_capture_help_lists_overrides() {
    let mut cmd = Command::cargo_bin("screen-recapture").expect("Calling binary failed");
    cmd.args(["capture", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--timeout").and(predicate::str::contains("--skip-existing")));
}

#[test]
fn test_capture_missing_originals_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing");

    let mut cmd = Command::cargo_bin("screen-recapture").expect("Calling binary failed");
    cmd.arg("capture")
        .arg("--originals")
        .arg(&missing)
        .arg("--output")
        .arg(temp_dir.path().join("pairs"))
        .assert()
        .failure();
}

#[test]
fn test_capture_empty_originals() {
    let temp_dir = TempDir::new().unwrap();
    let originals = temp_dir.path().join("originals");
    std::fs::create_dir_all(&originals).unwrap();
    std::fs::write(originals.join("readme.txt"), "not an image").unwrap();

    let mut cmd = Command::cargo_bin("screen-recapture").expect("Calling binary failed");
    cmd.arg("capture")
        .arg("--originals")
        .arg(&originals)
        .arg("--output")
        .arg(temp_dir.path().join("pairs"))
        .arg("--no-sound")
        .assert()
        .success()
        .stdout(predicate::str::contains("No originals found"));

    assert!(temp_dir.path().join("pairs").is_dir());
}

#[test]
fn test_missing_config_file_fails() {
    let mut cmd = Command::cargo_bin("screen-recapture").expect("Calling binary failed");
    cmd.args(["--config", "/definitely/not/here.toml", "probe"])
        .assert()
        .failure();
}

#[test]
fn test_probe_does_not_create_output_dir() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("screen-recapture").expect("Calling binary failed");
    cmd.current_dir(temp_dir.path())
        .env("RECAPTURE_DEVICE__ADB", "/definitely/not/adb")
        .arg("probe")
        .assert()
        .failure();

    assert!(!temp_dir.path().join("pairs").exists());
}
