use mockito::Matcher;
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;
use tempfile::tempdir;

const VIDEO_ID: &str = "dQw4w9WgXcQ";

fn gemini_body() -> String {
    let summary = json!({
        "summary": "A song about commitment.",
        "keyPoints": [{"point": "Never gonna give you up", "importance": "high"}],
        "chapters": [{"title": "Intro", "startTime": 0, "summary": "Opening bars"}]
    });
    json!({
        "candidates": [{"content": {"parts": [{"text": summary.to_string()}]}}]
    })
    .to_string()
}

fn vidsum(home: &Path, server: &mockito::ServerGuard) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("vidsum");
    cmd.current_dir(home)
        .env("VIDSUM_HOME", home.join("vidsum"))
        .env("VIDSUM_API_BASE_URL", server.url())
        .env("VIDSUM_MODEL", "gemini-test")
        .env_remove("VIDSUM_LOG");
    cmd
}

#[test]
fn summarize_fetches_once_then_serves_from_history() {
    let tmp = tempdir().expect("tempdir");
    let mut server = mockito::Server::new();
    let generate = server
        .mock("POST", "/models/gemini-test:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body())
        .expect(1)
        .create();

    vidsum(tmp.path(), &server)
        .args(["config", "set-key", "test-key", "--skip-test"])
        .assert()
        .success();

    vidsum(tmp.path(), &server)
        .args(["summarize", "https://youtu.be/dQw4w9WgXcQ", "--title", "Rick"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cached=false"))
        .stdout(predicate::str::contains("# Rick"))
        .stdout(predicate::str::contains("Never gonna give you up"));

    vidsum(tmp.path(), &server)
        .args(["summarize", VIDEO_ID])
        .assert()
        .success()
        .stdout(predicate::str::contains("cached=true"))
        .stdout(predicate::str::contains("# Rick"));

    generate.assert();

    let audit = std::fs::read_to_string(tmp.path().join("vidsum/logs/audit.log"))
        .expect("read audit log");
    assert!(audit.contains("\"cache_hit\""));
}

#[test]
fn summarize_without_key_fails_before_network() {
    let tmp = tempdir().expect("tempdir");
    let mut server = mockito::Server::new();
    let generate = server
        .mock("POST", "/models/gemini-test:generateContent")
        .match_query(Matcher::Any)
        .expect(0)
        .create();

    vidsum(tmp.path(), &server)
        .args(["summarize", VIDEO_ID])
        .assert()
        .failure()
        .stdout(predicate::str::contains("E001_CONFIG_MISSING"))
        .stdout(predicate::str::contains("API key not configured"));

    generate.assert();
    assert!(!tmp.path().join("vidsum/history.json").exists());
}

#[test]
fn summarize_reports_remote_message_verbatim() {
    let tmp = tempdir().expect("tempdir");
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/models/gemini-test:generateContent")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body(r#"{"error":{"code":429,"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#)
        .create();

    vidsum(tmp.path(), &server)
        .args(["config", "set-key", "test-key", "--skip-test"])
        .assert()
        .success();

    vidsum(tmp.path(), &server)
        .args(["summarize", VIDEO_ID])
        .assert()
        .failure()
        .stdout(predicate::str::contains("E003_REMOTE_FAILURE: quota exceeded"));

    vidsum(tmp.path(), &server)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("history is empty"));
}

#[test]
fn summarize_rejects_unrecognized_input() {
    let tmp = tempdir().expect("tempdir");
    let server = mockito::Server::new();

    vidsum(tmp.path(), &server)
        .args(["summarize", "https://example.com/watch?v=nope"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("summarize: failed"));
}
