use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary config directory
fn temp_config_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".wind-dashboard").join("config.json")
}

/// Command with an isolated $HOME and no API override from the environment.
fn isolated_cmd(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env("HOME", home.path()).env_remove("WIND_API_URL");
    cmd
}

/// Address nothing listens on, so requests fail fast.
const UNREACHABLE_API: &str = "http://127.0.0.1:9/api";

const BINARY_NAME: &str = "wind-dashboard";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Usage"))
        .stdout(contains("fetch"));
}

#[test]
/// A reversed range is rejected before anything is requested.
fn fetch_rejects_reversed_range() {
    let tmp = temp_config_dir();
    isolated_cmd(&tmp)
        .args(["fetch", "--start", "2024-02-01", "--end", "2024-01-01"])
        .args(["--api-url", UNREACHABLE_API])
        .assert()
        .failure()
        .stderr(contains("Start date cannot be after end date"));
}

#[test]
/// A range longer than the configured maximum is rejected before anything is requested.
fn fetch_rejects_span_over_limit() {
    let tmp = temp_config_dir();
    isolated_cmd(&tmp)
        .args(["fetch", "--start", "2024-01-01", "--end", "2024-01-20"])
        .args(["--max-range-days", "7", "--api-url", UNREACHABLE_API])
        .assert()
        .failure()
        .stderr(contains("Date range cannot exceed 7 days"));
}

#[test]
/// Malformed dates are rejected by argument parsing.
fn fetch_rejects_malformed_date() {
    let tmp = temp_config_dir();
    isolated_cmd(&tmp)
        .args(["fetch", "--start", "01/02/2024", "--end", "2024-02-02"])
        .assert()
        .failure()
        .stderr(contains("--start"));
}

#[test]
/// Bound discovery against an unreachable service fails.
fn bounds_fails_when_service_unreachable() {
    let tmp = temp_config_dir();
    isolated_cmd(&tmp)
        .args(["bounds", "--api-url", UNREACHABLE_API])
        .assert()
        .failure()
        .stderr(contains("Failed to discover dates"));
}

#[test]
/// Request diagnostics go to stderr when RUST_LOG asks for them.
fn bounds_logs_request_url_at_debug() {
    let tmp = temp_config_dir();
    isolated_cmd(&tmp)
        .env("RUST_LOG", "wind_dashboard=debug")
        .args(["bounds", "--api-url", UNREACHABLE_API])
        .assert()
        .failure()
        .stderr(contains("GET http://127.0.0.1:9/api/cap-dates/"));
}

#[test]
/// Request diagnostics stay quiet by default.
fn bounds_hides_request_url_by_default() {
    let tmp = temp_config_dir();
    isolated_cmd(&tmp)
        .env_remove("RUST_LOG")
        .args(["bounds", "--api-url", UNREACHABLE_API])
        .assert()
        .failure()
        .stderr(contains("GET http").not());
}

#[test]
/// Configure writes the settings to the config file.
fn configure_creates_config_file() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    assert!(!config_path.exists());

    isolated_cmd(&tmp)
        .args(["configure", "--api-url", "https://wind.example.com/api/"])
        .args(["--max-range-days", "14"])
        .assert()
        .success()
        .stderr(contains("Configuration saved"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("https://wind.example.com/api/"));
    assert!(contents.contains("14"));
}

#[test]
/// Configure refuses a value that could never be used.
fn configure_rejects_invalid_url() {
    let tmp = temp_config_dir();
    isolated_cmd(&tmp)
        .args(["configure", "--api-url", "ftp://wind.example.com"])
        .assert()
        .failure();
    assert!(!config_file_path(&tmp).exists());
}

#[test]
/// Reset command should delete an existing config file.
fn reset_deletes_config_file() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();

    // Ensure the file exists
    assert!(config_path.exists());

    isolated_cmd(&tmp)
        .arg("reset")
        .assert()
        .success()
        .stderr(contains("Configuration cleared"));

    // Confirm the file was deleted
    assert!(!config_path.exists());
}
