use assert_cmd::{cargo, prelude::*};
use predicates::prelude::*;
use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

/// Command isolated from the user's config and token
fn base_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("inbot"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("INBOT_TOKEN")
        .env_remove("TOKEN")
        .env_remove("INBOT_API_URL")
        .env_remove("INBOT_TIMEOUT_SECS")
        .arg("--no-color");
    cmd
}

#[test]
fn render_saved_performance_prints_message() {
    let home = TempDir::new().expect("failed to create temp home");

    let output = base_cmd(&home)
        .arg("render")
        .arg("tests/data/performance.json")
        .output()
        .expect("failed to run inbot");
    assert!(output.status.success());

    let payload: Value = serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(payload["response_type"], "ephemeral");
    assert_eq!(payload["attachments"][0]["color"], "#47bc2d");
    assert_eq!(
        payload["attachments"][0]["fields"][1]["value"],
        "8.0% acumulada (5.0% TAE)"
    );
    assert_eq!(payload["attachments"][1]["fields"][0]["value"], "4.0%");
    assert_eq!(payload["attachments"][2]["fields"][3]["value"], "12.00%");
}

#[test]
fn render_missing_file_fails() {
    let home = TempDir::new().expect("failed to create temp home");

    base_cmd(&home)
        .arg("render")
        .arg("tests/data/does_not_exist.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn invoke_without_token_prints_bare_500() {
    let home = TempDir::new().expect("failed to create temp home");

    // Unroutable API URL: the missing token must fail before any request
    let output = base_cmd(&home)
        .env("INBOT_API_URL", "http://127.0.0.1:9")
        .arg("invoke")
        .output()
        .expect("failed to run inbot");
    assert!(output.status.success());

    let response: Value = serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(response["statusCode"], 500);
    assert_eq!(response["body"], "");
    assert_eq!(response["headers"], serde_json::json!({}));
}

#[test]
fn invalid_config_file_is_reported() {
    let home = TempDir::new().expect("failed to create temp home");
    let config = home.path().join("config.toml");
    std::fs::write(&config, "token = [").expect("failed to write config");

    base_cmd(&home)
        .arg("--config")
        .arg(&config)
        .arg("invoke")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}
