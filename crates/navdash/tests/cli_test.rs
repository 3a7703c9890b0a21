//! Integration tests for the `navdash` CLI binary.
//!
//! Argument parsing, help output, completions and error handling run
//! without a server; session and navigation flows run against wiremock.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `navdash` binary with env isolation.
///
/// Clears all `NAVDASH_*` env vars and points config and data
/// directories at `home` so tests never touch the user's real state.
fn navdash_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("navdash");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env_remove("NAVDASH_PROFILE")
        .env_remove("NAVDASH_API_BASE")
        .env_remove("NAVDASH_OUTPUT")
        .env_remove("NAVDASH_INSECURE")
        .env_remove("NAVDASH_TIMEOUT")
        .env_remove("NAVDASH_STATE_DIR")
        .env_remove("NAVDASH_USERNAME")
        .env_remove("NAVDASH_PASSWORD")
        .env_remove("COLORFGBG")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn seed_session(state_dir: &Path, token: &str) {
    std::fs::create_dir_all(state_dir).unwrap();
    std::fs::write(
        state_dir.join("main.json"),
        json!({
            "version": 2,
            "token": token,
            "links": [],
            "categories": [],
            "lastModified": null,
            "config": { "enableNoAuth": false, "enableNoAuthView": false }
        })
        .to_string(),
    )
    .unwrap();
}

async fn mount_config(server: &MockServer, no_auth: bool, no_auth_view: bool) {
    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "enableNoAuth": no_auth,
            "enableNoAuthView": no_auth_view,
        })))
        .mount(server)
        .await;
}

async fn mount_navigation(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/navigation/last-modified"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "lastModified": 1_700_000_000_000_i64 })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/navigation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": [
                { "name": "Docs", "url": "https://docs.rs", "icon": "", "category": "dev", "sortIndex": 1 },
                { "name": "Crates", "url": "https://crates.io", "icon": "", "category": "dev", "sortIndex": 0 },
            ],
            "categories": ["dev"],
            "lastModified": 1_700_000_000_000_i64,
        })))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = navdash_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    navdash_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("bookmark dashboard")
            .and(predicate::str::contains("login"))
            .and(predicate::str::contains("links"))
            .and(predicate::str::contains("theme")),
    );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    navdash_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("navdash"));
}

#[test]
fn test_completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    navdash_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_links_subcommands_exist() {
    let home = tempfile::tempdir().unwrap();
    navdash_cmd(home.path())
        .args(["links", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("update"))
                .and(predicate::str::contains("delete"))
                .and(predicate::str::contains("move")),
        );
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let home = tempfile::tempdir().unwrap();
    let output = navdash_cmd(home.path()).arg("foobar").output().unwrap();
    assert!(!output.status.success(), "Expected failure for invalid subcommand");
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_links_list_without_dashboard() {
    let home = tempfile::tempdir().unwrap();
    navdash_cmd(home.path())
        .args(["links", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No dashboard configured"));
}

#[test]
fn test_invalid_api_base() {
    let home = tempfile::tempdir().unwrap();
    navdash_cmd(home.path())
        .args(["--api-base", "ftp://nav.example.com", "status"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("api_base"));
}

#[test]
fn test_config_show_no_config() {
    let home = tempfile::tempdir().unwrap();
    navdash_cmd(home.path()).args(["config", "show"]).assert().success();
}

// ── Theme ───────────────────────────────────────────────────────────

#[test]
fn test_theme_defaults_to_system() {
    let home = tempfile::tempdir().unwrap();
    let state = home.path().join("state");
    navdash_cmd(home.path())
        .args(["--state-dir", state.to_str().unwrap(), "-o", "plain", "theme"])
        .assert()
        .success()
        .stdout("system\n");
}

#[test]
fn test_theme_toggle_cycles_and_persists() {
    let home = tempfile::tempdir().unwrap();
    let state = home.path().join("state");
    let state = state.to_str().unwrap();

    for expected in ["light", "dark", "system"] {
        navdash_cmd(home.path())
            .args(["--state-dir", state, "-o", "plain", "theme", "toggle"])
            .assert()
            .success()
            .stdout(format!("{expected}\n"));
    }
}

#[test]
fn test_theme_set_resolves_darkness() {
    let home = tempfile::tempdir().unwrap();
    let state = home.path().join("state");
    let state = state.to_str().unwrap();

    navdash_cmd(home.path())
        .args(["--state-dir", state, "-o", "json-compact", "theme", "set", "light"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""mode":"light","isDark":false"#));

    // system mode follows the terminal's background hint
    navdash_cmd(home.path())
        .env("COLORFGBG", "0;15")
        .args(["--state-dir", state, "-o", "json-compact", "theme", "set", "system"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""isDark":false"#));
}

// ── Session ─────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_login_with_password_stdin_persists_token() {
    let server = MockServer::start().await;
    mount_config(&server, false, false).await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "username": "admin", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).insert_header("Authorization", "tok-9"))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let state = home.path().join("state");

    navdash_cmd(home.path())
        .args([
            "--api-base",
            &server.uri(),
            "--state-dir",
            state.to_str().unwrap(),
            "login",
            "--username",
            "admin",
            "--password-stdin",
        ])
        .write_stdin("hunter2\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Logged in as admin"));

    let saved = std::fs::read_to_string(state.join("main.json")).unwrap();
    assert!(saved.contains("tok-9"), "token not persisted:\n{saved}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_login_exits_with_auth_code() {
    let server = MockServer::start().await;
    mount_config(&server, false, false).await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    navdash_cmd(home.path())
        .args([
            "--api-base",
            &server.uri(),
            "--state-dir",
            home.path().join("state").to_str().unwrap(),
            "login",
            "--username",
            "admin",
            "--password-stdin",
        ])
        .write_stdin("wrong\n")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Login failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_clears_persisted_token() {
    let server = MockServer::start().await;
    mount_config(&server, false, false).await;

    let home = tempfile::tempdir().unwrap();
    let state = home.path().join("state");
    seed_session(&state, "tok-old");

    navdash_cmd(home.path())
        .args(["--api-base", &server.uri(), "--state-dir", state.to_str().unwrap(), "logout"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(state.join("main.json")).unwrap();
    assert!(!saved.contains("tok-old"), "token still persisted:\n{saved}");
}

// ── Route guard ─────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_links_list_requires_login() {
    let server = MockServer::start().await;
    mount_config(&server, false, false).await;
    Mock::given(method("GET"))
        .and(path("/validate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    navdash_cmd(home.path())
        .args([
            "--api-base",
            &server.uri(),
            "--state-dir",
            home.path().join("state").to_str().unwrap(),
            "links",
            "list",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Authentication required"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_anonymous_view_lists_links() {
    let server = MockServer::start().await;
    mount_config(&server, false, true).await;
    mount_navigation(&server).await;

    let home = tempfile::tempdir().unwrap();
    navdash_cmd(home.path())
        .args([
            "--api-base",
            &server.uri(),
            "--state-dir",
            home.path().join("state").to_str().unwrap(),
            "-o",
            "plain",
            "links",
            "list",
        ])
        .assert()
        .success()
        .stdout("https://crates.io\nhttps://docs.rs\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_anonymous_view_does_not_open_edits() {
    let server = MockServer::start().await;
    mount_config(&server, false, true).await;

    let home = tempfile::tempdir().unwrap();
    navdash_cmd(home.path())
        .args([
            "--api-base",
            &server.uri(),
            "--state-dir",
            home.path().join("state").to_str().unwrap(),
            "links",
            "delete",
            "0",
            "--yes",
        ])
        .assert()
        .code(3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_authenticated_list_as_json() {
    let server = MockServer::start().await;
    mount_config(&server, false, false).await;
    mount_navigation(&server).await;
    Mock::given(method("GET"))
        .and(path("/validate"))
        .and(header("Authorization", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let state = home.path().join("state");
    seed_session(&state, "tok-1");

    let output = navdash_cmd(home.path())
        .args([
            "--api-base",
            &server.uri(),
            "--state-dir",
            state.to_str().unwrap(),
            "-o",
            "json",
            "links",
            "list",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let links: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(links[0]["name"], "Crates");
    assert_eq!(links[0]["index"], 1);
    assert_eq!(links[1]["name"], "Docs");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_move_sends_sort_batch() {
    let server = MockServer::start().await;
    mount_config(&server, true, false).await;
    mount_navigation(&server).await;
    Mock::given(method("PUT"))
        .and(path("/navigation/sort"))
        .and(body_json(json!({
            "updates": [
                { "index": 0, "sortIndex": 0 },
                { "index": 1, "sortIndex": 1 },
            ]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    navdash_cmd(home.path())
        .args([
            "--api-base",
            &server.uri(),
            "--state-dir",
            home.path().join("state").to_str().unwrap(),
            "links",
            "move",
            "0",
            "0",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Moved link #0"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_rejects_empty_name() {
    let server = MockServer::start().await;
    mount_config(&server, true, false).await;
    mount_navigation(&server).await;
    Mock::given(method("PUT"))
        .and(path("/navigation/update/0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    navdash_cmd(home.path())
        .args([
            "--api-base",
            &server.uri(),
            "--state-dir",
            home.path().join("state").to_str().unwrap(),
            "links",
            "update",
            "0",
            "--name",
            "",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("name"));
}
