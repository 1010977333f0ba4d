use mockito::Matcher;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn vidsum(home: &Path, server: &mockito::ServerGuard) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("vidsum");
    cmd.current_dir(home)
        .env("VIDSUM_HOME", home.join("vidsum"))
        .env("VIDSUM_API_BASE_URL", server.url())
        .env("VIDSUM_MODEL", "gemini-test")
        .env_remove("VIDSUM_LOG");
    cmd
}

fn seed_history(home: &Path) {
    let dir = home.join("vidsum");
    fs::create_dir_all(&dir).expect("mkdir home");
    let history = json!({
        "summaryHistory": [{
            "videoId": "abcdefghijk",
            "title": "Rust in Production",
            "thumbnail": "https://i.ytimg.com/vi/abcdefghijk/mqdefault.jpg",
            "summary": {
                "summary": "How teams ship Rust.",
                "keyPoints": [{"point": "Start small", "importance": "medium"}],
                "chapters": []
            },
            "timestamp": 1_700_000_000_000u64
        }]
    });
    fs::write(dir.join("history.json"), history.to_string()).expect("write history");
}

#[test]
fn history_list_show_and_delete() {
    let tmp = tempdir().expect("tempdir");
    let server = mockito::Server::new();
    seed_history(tmp.path());

    vidsum(tmp.path(), &server)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 video summarized"))
        .stdout(predicate::str::contains("abcdefghijk"));

    vidsum(tmp.path(), &server)
        .args(["history", "show", "https://www.youtube.com/watch?v=abcdefghijk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Rust in Production"))
        .stdout(predicate::str::contains("Start small"));

    vidsum(tmp.path(), &server)
        .args(["history", "delete", "abcdefghijk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted abcdefghijk"));

    vidsum(tmp.path(), &server)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("history is empty"));
}

#[test]
fn export_writes_markdown_file() {
    let tmp = tempdir().expect("tempdir");
    let server = mockito::Server::new();
    seed_history(tmp.path());
    let out = tmp.path().join("summary.md");

    vidsum(tmp.path(), &server)
        .args(["export", "abcdefghijk", "--out"])
        .arg(&out)
        .assert()
        .success();

    let written = fs::read_to_string(&out).expect("read export");
    assert!(written.starts_with("# Rust in Production"));
    assert!(written.contains("Start small"));
}

#[test]
fn export_of_unknown_video_fails() {
    let tmp = tempdir().expect("tempdir");
    let server = mockito::Server::new();

    vidsum(tmp.path(), &server)
        .args(["export", "zzzzzzzzzzz", "--stdout"])
        .assert()
        .failure();
}

#[test]
fn share_prints_platform_link() {
    let tmp = tempdir().expect("tempdir");
    let server = mockito::Server::new();
    seed_history(tmp.path());

    vidsum(tmp.path(), &server)
        .args(["share", "abcdefghijk", "--platform", "linkedin"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://www.linkedin.com/sharing/share-offsite/",
        ));
}

#[test]
fn config_test_key_uses_remote_probe() {
    let tmp = tempdir().expect("tempdir");
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/models/gemini-test")
        .match_query(Matcher::UrlEncoded("key".into(), "bad-key".into()))
        .with_status(400)
        .with_body(r#"{"error":{"message":"API key not valid"}}"#)
        .create();

    vidsum(tmp.path(), &server)
        .args(["config", "set-key", "bad-key"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("API key is invalid"));

    vidsum(tmp.path(), &server)
        .args(["status"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("No API key configured"));
}
