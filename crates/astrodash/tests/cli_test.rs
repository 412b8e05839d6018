//! Integration tests for the `astrodash` CLI binary.
//!
//! Argument parsing, help output, completions, and config handling run
//! without a proxy; data commands run against a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `astrodash` binary with env isolation.
///
/// Clears all `ASTRODASH_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn astrodash_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("astrodash");
    cmd.env("HOME", "/tmp/astrodash-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/astrodash-cli-test-nonexistent")
        .env_remove("ASTRODASH_CONFIG")
        .env_remove("ASTRODASH_PROXY_URL")
        .env_remove("ASTRODASH_TIMEOUT")
        .env_remove("ASTRODASH_OUTPUT")
        .env_remove("ASTRODASH_PROXY__URL")
        .env_remove("ASTRODASH_PROXY__TIMEOUT_SECS")
        .env_remove("ASTRODASH_DASHBOARD__USER_NAME")
        .env_remove("ASTRODASH_DASHBOARD__ROVERS")
        .env_remove("ASTRODASH_DASHBOARD__DEFAULT_ROVER")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn photo(id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "sol": 4102,
        "camera": { "id": 20, "name": "FHAZ", "full_name": "Front Hazard Avoidance Camera" },
        "img_src": format!("https://mars.nasa.gov/{id}.jpg"),
        "earth_date": "2024-02-19",
        "rover": {
            "id": 5,
            "name": "Curiosity",
            "landing_date": "2012-08-06",
            "launch_date": "2011-11-26",
            "status": "active"
        }
    })
}

async fn mount_apod(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/apod"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "image": {
                "date": "2024-03-01",
                "title": "Pillars of Creation",
                "explanation": "Stars forming.",
                "media_type": "image",
                "url": "https://apod.nasa.gov/image.jpg"
            }
        })))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = astrodash_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(
        text.contains("Usage"),
        "Expected 'Usage' in output:\n{text}"
    );
}

#[test]
fn test_help_flag() {
    astrodash_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Astronomy Picture of the Day")
            .and(predicate::str::contains("photos"))
            .and(predicate::str::contains("manifest"))
            .and(predicate::str::contains("dashboard")),
    );
}

#[test]
fn test_version_flag() {
    astrodash_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("astrodash"));
}

#[test]
fn test_completions_zsh() {
    astrodash_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Offline commands ────────────────────────────────────────────────

#[test]
fn test_rovers_lists_default_roster() {
    astrodash_cmd()
        .args(["rovers", "-o", "plain"])
        .assert()
        .success()
        .stdout("curiosity\nopportunity\nspirit\n");
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    let file_arg = file.to_str().unwrap();

    astrodash_cmd()
        .args(["--config", file_arg, "config", "init"])
        .assert()
        .success();
    assert!(file.exists());

    astrodash_cmd()
        .args(["--config", file_arg, "config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    astrodash_cmd()
        .args([
            "--config",
            file_arg,
            "--proxy-url",
            "http://proxy.test:9999",
        ])
        .args(["config", "show", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://proxy.test:9999"));
}

#[test]
fn test_env_overrides_config_file() {
    astrodash_cmd()
        .env("ASTRODASH_DASHBOARD__ROVERS", "[spirit]")
        .args(["rovers", "-o", "plain"])
        .assert()
        .success()
        .stdout("spirit\n");
}

#[test]
fn test_unknown_rover_is_usage_error() {
    astrodash_cmd()
        .args(["photos", "sojourner", "--proxy-url", "http://127.0.0.1:9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("sojourner"));
}

#[test]
fn test_invalid_proxy_url() {
    astrodash_cmd()
        .args(["apod", "--proxy-url", "not a url"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("proxy.url"));
}

#[test]
fn test_unreachable_proxy() {
    astrodash_cmd()
        .args(["apod", "--proxy-url", "http://127.0.0.1:9"])
        .args(["--timeout", "2"])
        .assert()
        .code(7);
}

// ── Against a mock proxy ────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_apod_json_output() {
    let server = MockServer::start().await;
    mount_apod(&server).await;

    let output = astrodash_cmd()
        .args(["apod", "-o", "json", "--proxy-url", &server.uri()])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["title"], "Pillars of Creation");
    assert_eq!(value["media"]["type"], "image");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_photos_plain_respects_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rovers/curiosity"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [photo(1), photo(2), photo(3)] })),
        )
        .mount(&server)
        .await;

    astrodash_cmd()
        .args(["photos", "Curiosity", "--limit", "2", "-o", "plain"])
        .args(["--proxy-url", &server.uri()])
        .assert()
        .success()
        .stdout("https://mars.nasa.gov/1.jpg\nhttps://mars.nasa.gov/2.jpg\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_photos_show_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rovers/spirit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    astrodash_cmd()
        .args(["photos", "spirit", "--proxy-url", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No photos available for the selected rover.",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_proxy_500_fails_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rovers/spirit"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    astrodash_cmd()
        .args(["photos", "spirit", "--proxy-url", &server.uri()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HTTP 500"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_photos_table_lists_sol() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rovers/curiosity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [photo(7)] })))
        .mount(&server)
        .await;

    astrodash_cmd()
        .args(["photos", "curiosity", "--proxy-url", &server.uri()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("4102")
                .and(predicate::str::contains("https://mars.nasa.gov/7.jpg")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_manifest_table_shows_sol_and_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/manifests/opportunity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "name": "Opportunity",
                "landing_date": "2004-01-25",
                "launch_date": "2003-07-07",
                "status": "complete",
                "max_sol": 5111,
                "max_date": "2018-06-11",
                "total_photos": 198_439
            }
        })))
        .mount(&server)
        .await;

    astrodash_cmd()
        .args(["manifest", "opportunity", "--color", "never"])
        .args(["--proxy-url", &server.uri()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Latest sol:   5111")
                .and(predicate::str::contains("Total photos: 198439")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dashboard_renders_partial_failures() {
    let server = MockServer::start().await;
    mount_apod(&server).await;
    Mock::given(method("GET"))
        .and(path("/rovers/opportunity"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/manifests/opportunity"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    astrodash_cmd()
        .args(["dashboard", "--rover", "opportunity"])
        .args(["--proxy-url", &server.uri()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Welcome, Chris!")
                .and(predicate::str::contains("Pillars of Creation"))
                .and(predicate::str::contains("Curiosity [Opportunity] Spirit"))
                .and(predicate::str::contains(
                    "No photos available for the selected rover.",
                )),
        );
}
