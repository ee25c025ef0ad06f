//! End-to-end tests for the binary: argument parsing, config handling and a
//! full list flow against a mock backend.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config dir pre-seeded with a profile pointing at `api_url`.
fn config_dir(api_url: &str) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let config = format!(
        "default_profile = \"default\"\n\n\
         [profiles.default]\n\
         api_url = \"{}\"\n",
        api_url
    );
    std::fs::write(dir.path().join("config.toml"), config).expect("write config");
    dir
}

fn loja(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("loja-cli").expect("binary");
    cmd.arg("--config-dir").arg(dir.path());
    cmd.env_remove("LOJA_TOKEN");
    cmd
}

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("loja-cli")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("user"))
        .stdout(predicate::str::contains("product"))
        .stdout(predicate::str::contains("company"))
        .stdout(predicate::str::contains("sale"));
}

#[test]
fn config_show_prints_profile() {
    let dir = config_dir("http://localhost:8000");
    loja(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:8000"));
}

#[test]
fn config_set_rejects_unknown_key() {
    let dir = config_dir("http://localhost:8000");
    loja(&dir)
        .args(["config", "set", "color", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn unauthenticated_list_asks_for_login() {
    let dir = config_dir("http://localhost:8000");
    loja(&dir)
        .args(["user", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires authentication"))
        .stderr(predicate::str::contains("auth login"));
}

#[test]
fn menu_filters_entries_by_role() {
    let dir = config_dir("http://localhost:8000");
    loja(&dir)
        .args(["menu", "--role-id", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sales"))
        .stdout(predicate::str::contains("Users").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn user_list_renders_table_and_footer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("authorization", "Bearer cli-token"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 1, "name": "Ana", "email": "ana@example.com",
                 "phone": "11987654321", "role_id": 1, "active": true}
            ],
            "metadata": {"total": 25}
        })))
        .mount(&server)
        .await;

    let dir = config_dir(&server.uri());
    loja(&dir)
        .args(["--token", "cli-token", "user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ana@example.com"))
        .stdout(predicate::str::contains("(11) 98765-4321"))
        .stdout(predicate::str::contains(
            "Showing 1-10 of 25 records (Page 1 of 3)",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn page_past_the_end_is_refetched_at_the_clamped_page() {
    let server = MockServer::start().await;
    // The absurd requested page lands far past the 3-page result set
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("skip", "4999999990"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [], "metadata": {"total": 25}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("skip", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 21, "name": "Eva", "email": "eva@example.com", "active": true}
            ],
            "metadata": {"total": 25}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = config_dir(&server.uri());
    loja(&dir)
        .args(["--token", "cli-token", "user", "list", "--page", "500000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("eva@example.com"))
        .stdout(predicate::str::contains(
            "Showing 21-25 of 25 records (Page 3 of 3)",
        ));
}

#[test]
fn auth_status_reports_unauthenticated() {
    let dir = config_dir("http://localhost:8000");
    loja(&dir)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile:       default"))
        .stdout(predicate::str::contains("Authenticated: no"));
}

#[tokio::test(flavor = "multi_thread")]
async fn backend_error_detail_reaches_stderr() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Product not found"})),
        )
        .mount(&server)
        .await;

    let dir = config_dir(&server.uri());
    loja(&dir)
        .args(["--token", "cli-token", "product", "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Product not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn deactivate_with_yes_skips_prompt_and_refreshes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4, "name": "Bia", "email": "bia@example.com", "active": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [], "metadata": {"total": 0}
        })))
        .mount(&server)
        .await;

    let dir = config_dir(&server.uri());
    loja(&dir)
        .args(["--token", "cli-token", "user", "deactivate", "4", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No records found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_user_validation_fails_before_any_request() {
    // No mock server mounted on this port; a request would fail loudly
    let dir = config_dir("http://127.0.0.1:9");
    loja(&dir)
        .args([
            "--token",
            "cli-token",
            "user",
            "create",
            "--name",
            "Ana",
            "--email",
            "not-an-email",
            "--password",
            "secret",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email"));
}
