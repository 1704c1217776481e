//! Integration tests for fail-fast CLI behavior.
//!
//! Every case here must fail before any network call, so the tests need
//! neither a token nor connectivity.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn prh_binary() -> String {
    env!("CARGO_BIN_EXE_prh").to_string()
}

/// Run prh with a scratch HOME and no ambient credentials.
fn run(args: &[&str], home: &Path) -> Output {
    Command::new(prh_binary())
        .args(args)
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("GITHUB_TOKEN")
        .env_remove("PRH_GITHUB_TOKEN")
        .output()
        .expect("failed to run prh")
}

#[test]
fn missing_parameters_exit_nonzero() {
    let temp = TempDir::new().unwrap();
    let output = run(&[], temp.path());

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("required"),
        "stderr should name the missing parameters: {stderr}"
    );
}

#[test]
fn malformed_url_exits_nonzero() {
    let temp = TempDir::new().unwrap();
    let output = run(&["https://github.com/acme/widgets/issues/9"], temp.path());

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("not a pull request URL"),
        "stderr should describe the URL mismatch: {stderr}"
    );
}

#[test]
fn missing_token_exits_nonzero_before_network() {
    let temp = TempDir::new().unwrap();
    let output = run(&["https://github.com/acme/widgets/pull/9"], temp.path());

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("GitHub token is required"),
        "stderr should point at the missing credential: {stderr}"
    );
}

#[test]
fn invalid_config_file_exits_nonzero() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");
    std::fs::write(&config_path, "github_token = [not valid toml").unwrap();

    let output = run(
        &[
            "https://github.com/acme/widgets/pull/9",
            "--config",
            config_path.to_str().unwrap(),
        ],
        temp.path(),
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to load configuration"),
        "stderr should report the config failure: {stderr}"
    );
}

#[test]
fn help_lists_both_invocation_forms() {
    let temp = TempDir::new().unwrap();
    let output = run(&["--help"], temp.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--org"));
    assert!(stdout.contains("--repo"));
    assert!(stdout.contains("--pull"));
    assert!(stdout.contains("URL"));
}
