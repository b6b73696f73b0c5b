//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizdeck() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizdeck").unwrap()
}

const SAMPLE_QUIZ: &str = r#"
[quiz]
id = 1
title = "Sample Quiz"
description = "Two easy questions"
time_limit_minutes = 5

[[questions]]
id = 1
text = "Pick A"
option_a = "right"
option_b = "wrong"
option_c = "wrong"
option_d = "wrong"
correct = "A"
display_order = 1

[[questions]]
id = 2
text = "Pick C"
option_a = "wrong"
option_b = "wrong"
option_c = "right"
option_d = "wrong"
correct = "C"
display_order = 2
"#;

#[test]
fn validate_valid_quiz() {
    let dir = TempDir::new().unwrap();
    let quiz_path = dir.path().join("sample.toml");
    std::fs::write(&quiz_path, SAMPLE_QUIZ).unwrap();

    quizdeck()
        .arg("validate")
        .arg("--quiz")
        .arg(&quiz_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 questions"))
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn validate_warns_on_empty_quiz() {
    let dir = TempDir::new().unwrap();
    let quiz_path = dir.path().join("empty.toml");
    std::fs::write(
        &quiz_path,
        "[quiz]\nid = 5\ntitle = \"Empty\"\n",
    )
    .unwrap();

    quizdeck()
        .arg("validate")
        .arg("--quiz")
        .arg(&quiz_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("no questions"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    quizdeck()
        .arg("validate")
        .arg("--quiz")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizdeck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizdeck.toml"))
        .stdout(predicate::str::contains("Created quizzes/example.toml"));

    assert!(dir.path().join("quizdeck.toml").exists());
    assert!(dir.path().join("quizzes/example.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    quizdeck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    // Second init should skip
    quizdeck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_then_validate_example() {
    let dir = TempDir::new().unwrap();

    quizdeck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizdeck()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--quiz")
        .arg("quizzes/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn results_empty_store() {
    let dir = TempDir::new().unwrap();

    quizdeck()
        .arg("results")
        .arg("--store")
        .arg(dir.path().join("completions.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No completed quizzes yet"));
}

#[test]
fn list_from_quiz_file() {
    let dir = TempDir::new().unwrap();
    let quiz_path = dir.path().join("sample.toml");
    std::fs::write(&quiz_path, SAMPLE_QUIZ).unwrap();

    quizdeck()
        .arg("list")
        .arg("--file")
        .arg(&quiz_path)
        .arg("--store")
        .arg(dir.path().join("completions.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample Quiz"));
}

#[test]
fn take_missing_quiz_points_back_to_list() {
    let dir = TempDir::new().unwrap();
    let quiz_path = dir.path().join("sample.toml");
    std::fs::write(&quiz_path, SAMPLE_QUIZ).unwrap();

    quizdeck()
        .arg("take")
        .arg("--quiz")
        .arg("42")
        .arg("--file")
        .arg(&quiz_path)
        .arg("--store")
        .arg(dir.path().join("completions.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"))
        .stderr(predicate::str::contains("quizdeck list"));
}

#[test]
fn help_output() {
    quizdeck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz-taking and grading harness"));
}

#[test]
fn version_output() {
    quizdeck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizdeck"));
}
