//! End-to-end attempt tests: a full `quizdeck take` run driven over stdin.
//!
//! These pipe a scripted attempt through the real binary and then inspect
//! the completion store and report artifacts it leaves on disk.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizdeck() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizdeck").unwrap()
}

const QUIZ: &str = r#"
[quiz]
id = 7
title = "End To End"
description = "Scripted attempt"
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
text = "Pick B"
option_a = "wrong"
option_b = "right"
option_c = "wrong"
option_d = "wrong"
correct = "B"
display_order = 2

[[questions]]
id = 3
text = "Pick C"
option_a = "wrong"
option_b = "wrong"
option_c = "right"
option_d = "wrong"
correct = "C"
display_order = 3

[[questions]]
id = 4
text = "Pick D"
option_a = "wrong"
option_b = "wrong"
option_c = "wrong"
option_d = "right"
correct = "D"
display_order = 4
"#;

struct TakeRun {
    dir: TempDir,
}

impl TakeRun {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("quiz.toml"), QUIZ).unwrap();
        Self { dir }
    }

    fn command(&self) -> Command {
        let mut cmd = quizdeck();
        cmd.arg("take")
            .arg("--quiz")
            .arg("7")
            .arg("--file")
            .arg(self.dir.path().join("quiz.toml"))
            .arg("--store")
            .arg(self.dir.path().join("completions.json"))
            .arg("--output")
            .arg(self.dir.path().join("reports"));
        cmd
    }

    fn stored_records(&self) -> serde_json::Value {
        let content =
            std::fs::read_to_string(self.dir.path().join("completions.json")).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    fn report_files(&self) -> Vec<String> {
        let dir = self.dir.path().join("reports");
        if !dir.exists() {
            return Vec::new();
        }
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

#[test]
fn scripted_attempt_grades_stores_and_reports() {
    let run = TakeRun::new();

    // Enter to start, three right and one wrong, then submit.
    run.command()
        .write_stdin("\n1 A\n2 B\n3 C\n4 A\nsubmit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz complete!"))
        .stdout(predicate::str::contains("3/4"))
        .stdout(predicate::str::contains("75%"))
        .stdout(predicate::str::contains("B+"));

    let records = run.stored_records();
    assert_eq!(records.as_array().unwrap().len(), 1);
    let record = &records[0];
    assert_eq!(record["quiz_id"], 7);
    assert_eq!(record["score"], 3);
    assert_eq!(record["total"], 4);
    assert_eq!(record["percentage"], 75);
    assert_eq!(record["grade"], "B+");

    let reports = run.report_files();
    assert_eq!(reports.len(), 2, "text and html artifacts: {reports:?}");
    assert!(reports.iter().any(|n| n.ends_with(".txt")));
    assert!(reports.iter().any(|n| n.ends_with(".html")));
}

#[test]
fn changed_answer_keeps_the_latest() {
    let run = TakeRun::new();

    run.command()
        .write_stdin("\n1 B\n1 A\n2 B\n3 C\n4 D\nsubmit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("4/4"))
        .stdout(predicate::str::contains("100%"))
        .stdout(predicate::str::contains("A+"));
}

#[test]
fn retake_replaces_the_stored_record() {
    let run = TakeRun::new();

    run.command()
        .write_stdin("\n1 A\nsubmit\n")
        .assert()
        .success();
    run.command()
        .write_stdin("\n1 A\n2 B\n3 C\n4 D\nsubmit\n")
        .assert()
        .success();

    let records = run.stored_records();
    assert_eq!(
        records.as_array().unwrap().len(),
        1,
        "second attempt replaces, never appends"
    );
    assert_eq!(records[0]["score"], 4);
}

#[test]
fn quit_at_preview_stores_nothing() {
    let run = TakeRun::new();

    run.command()
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing was recorded"));

    assert!(!run.dir.path().join("completions.json").exists());
    assert!(run.report_files().is_empty());
}

#[test]
fn unanswered_submission_grades_to_f() {
    let run = TakeRun::new();

    run.command()
        .write_stdin("\nsubmit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("0/4"))
        .stdout(predicate::str::contains("0%"))
        .stdout(predicate::str::contains("F"));

    let records = run.stored_records();
    assert_eq!(records[0]["grade"], "F");
}

#[test]
fn format_none_skips_reports() {
    let run = TakeRun::new();

    run.command()
        .arg("--format")
        .arg("none")
        .write_stdin("\n1 A\nsubmit\n")
        .assert()
        .success();

    assert!(run.report_files().is_empty());
    assert!(run.dir.path().join("completions.json").exists());
}
