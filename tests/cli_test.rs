use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("roadmap-optimizer").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_main_flags() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--goal"))
        .stdout(predicate::str::contains("--features"))
        .stdout(predicate::str::contains("--batch"));
}

#[test]
fn test_batch_without_key_fails_before_any_request() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["--batch", "--base-url", "http://127.0.0.1:9"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter your API key."));
}

#[test]
fn test_blank_key_is_treated_as_missing() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["--batch", "--api-key", "   ", "--base-url", "http://127.0.0.1:9"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter your API key."));
}

#[test]
fn test_unreadable_features_file_is_reported() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("features.txt");
    cmd(&home)
        .args(["--batch", "--features"])
        .arg(&missing)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read features file"));
}

#[test]
fn test_unreachable_model_is_a_model_error() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["--batch", "--api-key", "k", "--base-url", "http://127.0.0.1:9"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Model request failed"));
}
