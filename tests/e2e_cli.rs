//! CLI end-to-end tests
//!
//! Tests for the tvstreams command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the tvstreams binary
#[allow(deprecated)]
fn tvstreams_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tvstreams").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("PORT");
    cmd
}

fn write_config(dir: &Path, data_dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    fs::write(
        &path,
        format!(
            "[server]\nport = 7001\n\n[data]\ndir = {:?}\n\n[streams]\nliveness_check = true\n",
            data_dir
        ),
    )
    .unwrap();
    path
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = tvstreams_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = tvstreams_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tvstreams"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = tvstreams_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_start_help() {
    let mut cmd = tvstreams_cmd();
    cmd.args(["start", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Start the addon server"))
        .stdout(predicate::str::contains("--liveness-check"))
        .stdout(predicate::str::contains("--no-liveness-check"));
}

/// Run `start` against a port that is already taken. The server logs the
/// gate state before binding, then exits with the bind error.
fn start_on_taken_port(config_liveness: bool, flags: &[&str]) -> assert_cmd::assert::Assert {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        format!(
            "[data]\ndir = {:?}\n\n[streams]\nliveness_check = {}\n",
            dir.path(),
            config_liveness
        ),
    )
    .unwrap();

    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port().to_string();

    let mut cmd = tvstreams_cmd();
    cmd.arg("--config")
        .arg(&config)
        .args(["start", "--host", "127.0.0.1", "--port", &port])
        .args(flags)
        .assert()
        .failure()
}

#[test]
fn test_cli_start_no_liveness_check_overrides_config() {
    start_on_taken_port(true, &["--no-liveness-check"])
        .stdout(predicate::str::contains("liveness check disabled"));
}

#[test]
fn test_cli_start_liveness_check_overrides_config() {
    start_on_taken_port(false, &["--liveness-check"])
        .stdout(predicate::str::contains("liveness check enabled"));
}

#[test]
fn test_cli_start_last_liveness_flag_wins() {
    start_on_taken_port(false, &["--liveness-check", "--no-liveness-check"])
        .stdout(predicate::str::contains("liveness check disabled"));
}

#[test]
fn test_cli_start_keeps_config_liveness_without_flags() {
    start_on_taken_port(true, &[]).stdout(predicate::str::contains("liveness check enabled"));
}

#[test]
fn test_cli_validate_reports_catalog() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("a_organized_series_data.json"),
        r#"[{"id": "tt1", "name": "One", "seasons": [
            {"season": 1, "episodes": [{"episode": 1, "stream_url": "http://x/1"}, {"episode": 2}]}
        ]}]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("b_organized_series_data.json"),
        r#"[{"id": "tt1", "name": "Again"}]"#,
    )
    .unwrap();
    let config = write_config(dir.path(), dir.path());

    let mut cmd = tvstreams_cmd();
    cmd.arg("validate")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Server: 0.0.0.0:7001"))
        .stdout(predicate::str::contains("Liveness check: true"))
        .stdout(predicate::str::contains("Data files: 2"))
        .stdout(predicate::str::contains("Series: 2"))
        .stdout(predicate::str::contains("Episodes: 2"))
        .stdout(predicate::str::contains("Missing stream URLs: 1"))
        .stdout(predicate::str::contains("Duplicate ids: 1"));
}

#[test]
fn test_cli_validate_fails_on_malformed_data() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x_organized_series_data.json"), "[{\"id\":").unwrap();
    let config = write_config(dir.path(), dir.path());

    let mut cmd = tvstreams_cmd();
    cmd.arg("validate")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("x_organized_series_data.json"));
}

#[test]
fn test_cli_validate_rejects_invalid_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[streams]\nprobe_timeout_secs = 0\n").unwrap();

    let mut cmd = tvstreams_cmd();
    cmd.arg("validate").arg(&config).assert().failure();
}

#[test]
fn test_cli_start_fails_on_malformed_data() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x_organized_series_data.json"), "not json").unwrap();
    let config = write_config(dir.path(), dir.path());

    let mut cmd = tvstreams_cmd();
    cmd.args(["--config"])
        .arg(&config)
        .args(["start", "--port", "7099"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("x_organized_series_data.json"));
}

#[test]
fn test_cli_split_command() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("shows.json");
    fs::write(&input, r#"[1, 2, 3, 4, 5]"#).unwrap();

    let mut cmd = tvstreams_cmd();
    cmd.arg("split")
        .arg(&input)
        .args(["--parts", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Part 2 written to"));

    let first: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("shows.json_part1.json")).unwrap())
            .unwrap();
    let second: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("shows.json_part2.json")).unwrap())
            .unwrap();
    assert_eq!(first, serde_json::json!([1, 2, 3]));
    assert_eq!(second, serde_json::json!([4, 5]));
}

#[test]
fn test_cli_split_rejects_zero_parts() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("shows.json");
    fs::write(&input, "[]").unwrap();

    let mut cmd = tvstreams_cmd();
    cmd.arg("split")
        .arg(&input)
        .args(["--parts", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positive integer"));
}

#[test]
fn test_cli_probe_malformed_url_is_unreachable() {
    let mut cmd = tvstreams_cmd();
    cmd.args(["probe", "not a url", "--timeout-secs", "1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unreachable: not a url"));
}
