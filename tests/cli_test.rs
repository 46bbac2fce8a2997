//! Integration tests for the stackpulse binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Config that touches neither the network nor any external tool.
const OFFLINE_CONFIG: &str = r#"
heading: Offline
packages: []
show_deployment_info: false
show_audit_info: false
"#;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".stackpulse");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yml"), config).unwrap();
    temp
}

fn stackpulse() -> Command {
    let mut cmd = Command::new(cargo_bin("stackpulse"));
    cmd.env_remove("STACKPULSE_CONFIG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    stackpulse()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_DESCRIPTION")))
        .stdout(predicate::str::contains("watch"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    stackpulse()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_no_args_shows_report() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(OFFLINE_CONFIG);
    stackpulse()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Offline"))
        .stdout(predicate::str::contains("Stat"));
    Ok(())
}

#[test]
fn cli_show_json_is_parseable() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(OFFLINE_CONFIG);
    let output = stackpulse()
        .args(["--project", temp.path().to_str().unwrap(), "show", "--json"])
        .output()?;

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["heading"], "Offline");
    assert_eq!(json["entries"], serde_json::json!([]));
    Ok(())
}

#[test]
fn cli_show_reads_release_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(
        r#"
packages: []
show_audit_info: false
"#,
    );
    fs::write(temp.path().join(".release-info"), "Fix bug|1700000000|extra")?;

    let output = stackpulse()
        .args(["--project", temp.path().to_str().unwrap(), "show", "--json"])
        // keep git from finding a repository above the temp dir
        .env("GIT_CEILING_DIRECTORIES", temp.path())
        .output()?;

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let entry = &json["entries"][0];
    assert_eq!(entry["label"], "Last Deployment");
    assert_eq!(entry["description"], "Fix bug");
    assert_eq!(entry["extra_attributes"]["title"], "2023-11-14 22:13:20 UTC");
    assert!(entry["value"].as_str().unwrap().ends_with("ago"));
    Ok(())
}

#[test]
fn cli_invalid_config_exits_with_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("timeouts:\n  http_secs: 0\n");
    stackpulse()
        .current_dir(temp.path())
        .arg("show")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("http_secs"));
    Ok(())
}

#[test]
fn cli_config_override_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let file = temp.path().join("custom.yml");
    fs::write(&file, OFFLINE_CONFIG)?;

    stackpulse()
        .current_dir(temp.path())
        .args(["--config", file.to_str().unwrap(), "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.yml"))
        .stdout(predicate::str::contains("heading: Offline"));
    Ok(())
}

#[test]
fn cli_config_schema() -> Result<(), Box<dyn std::error::Error>> {
    stackpulse()
        .args(["config", "--schema"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"polling_interval\""));
    Ok(())
}

#[test]
fn cli_init_creates_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    stackpulse()
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let written = fs::read_to_string(temp.path().join(".stackpulse/config.yml"))?;
    assert!(written.contains("laravel/framework"));

    stackpulse()
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--force"));
    Ok(())
}

#[test]
fn cli_watch_stops_after_iterations() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(OFFLINE_CONFIG);
    stackpulse()
        .current_dir(temp.path())
        .args(["watch", "--interval", "1s", "--iterations", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("refreshing every 1s").count(2));
    Ok(())
}

#[test]
fn cli_completions() -> Result<(), Box<dyn std::error::Error>> {
    stackpulse()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stackpulse"));
    Ok(())
}

#[test]
fn cli_unknown_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    stackpulse().arg("frobnicate").assert().failure();
    Ok(())
}
