use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn artworks_body(first_id: u64, count: u64, total: u64) -> serde_json::Value {
    let data: Vec<_> = (first_id..first_id + count)
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Artwork {}", id),
                "place_of_origin": "Japan",
                "artist_display": "Katsushika Hokusai\nJapanese, 1760-1849",
                "inscriptions": null,
                "date_start": 1830,
                "date_end": 1833
            })
        })
        .collect();
    json!({ "pagination": { "total": total, "limit": 12 }, "data": data })
}

fn artwork_table(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("artwork-table").expect("binary builds");
    cmd.env_remove("ARTWORK_TABLE_BASE_URL")
        .arg("--no-color")
        .arg("--config-dir")
        .arg(config_dir.path());
    cmd
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("artwork-table")
        .expect("binary builds")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("page"))
        .stdout(predicate::str::contains("select"))
        .stdout(predicate::str::contains("browse"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_page_prints_table_and_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/artworks"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(artworks_body(13, 12, 30)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    artwork_table(&dir)
        .args(["--base-url", &server.uri(), "page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] 12"))
        .stdout(predicate::str::contains(
            "Showing 13-24 of 30 records (Page 2 of 3)",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_page_reports_http_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/artworks"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    artwork_table(&dir)
        .args(["--base-url", &server.uri(), "page"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Fetching error: HTTP error: 503"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_select_accumulates_from_next_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/artworks"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(artworks_body(1, 12, 100)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/artworks"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(artworks_body(13, 12, 100)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    artwork_table(&dir)
        .args(["--base-url", &server.uri(), "select", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20 rows selected, 1 more page(s) fetched"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_select_rejects_invalid_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/artworks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(artworks_body(1, 12, 100)))
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    artwork_table(&dir)
        .args(["--base-url", &server.uri(), "select", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'abc' is not a positive number of rows"));
}

#[test]
fn test_page_zero_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    artwork_table(&dir)
        .args(["--base-url", "http://127.0.0.1:9", "page", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Page numbers start at 1"));
}

#[test]
fn test_config_set_then_show() {
    let dir = TempDir::new().expect("tempdir");

    artwork_table(&dir)
        .args(["config", "set", "timeout_seconds", "5"])
        .assert()
        .success();
    assert!(dir.path().join("config.toml").exists());

    artwork_table(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("timeout_seconds: 5"))
        .stdout(predicate::str::contains("use_colors: true (default)"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let dir = TempDir::new().expect("tempdir");
    artwork_table(&dir)
        .args(["config", "set", "profile", "default"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key 'profile'"))
        .stderr(predicate::str::contains("Valid keys are"));
}

#[test]
fn test_browse_quits_on_end_of_input() {
    let dir = TempDir::new().expect("tempdir");
    // nothing listens on port 9; the first page fails and the session still starts
    artwork_table(&dir)
        .args(["--base-url", "http://127.0.0.1:9", "browse"])
        .write_stdin("h\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("next page"));
}
