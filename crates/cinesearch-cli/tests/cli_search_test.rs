#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

fn cinesearch(dir: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.env("OMDB_API_KEY", "test-key")
        .arg("--dir")
        .arg(dir.path());
    cmd
}

#[test]
fn test_search_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--query"))
        .stdout(predicate::str::contains("--type"));
}

#[test]
fn test_search_missing_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.args(["search"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_search_short_query_is_rejected() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cinesearch(&dir)
        .args(["search", "--query", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please enter at least 2 characters",
        ));
}

#[test]
fn test_search_page_beyond_limit_is_rejected() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cinesearch(&dir)
        .args(["search", "--query", "batman", "--page", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Search limited to 3 pages"));
}

#[test]
fn test_search_invalid_type() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cinesearch(&dir)
        .args(["search", "--query", "batman", "--type", "episode"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown type filter"));
}

#[test]
fn test_detail_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.args(["detail", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--id"));
}

#[test]
fn test_config_set_then_show() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    cinesearch(&dir)
        .args(["config", "set", "--base-url", "http://127.0.0.1:9/"])
        .assert()
        .success();

    // Assert
    let written = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(written.contains("base_url = \"http://127.0.0.1:9/\""));
    cinesearch(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://127.0.0.1:9/"));
}

#[test]
fn test_config_set_without_values_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cinesearch(&dir)
        .args(["config", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to set"));
}

#[test]
fn test_invalid_config_file_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[omdb\n").unwrap();

    // Act & Assert
    cinesearch(&dir)
        .args(["search", "--query", "batman"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}
