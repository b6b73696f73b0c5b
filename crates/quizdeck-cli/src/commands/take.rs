//! The `quizdeck take` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdeck_core::attempt::Attempt;
use quizdeck_core::store::CompletionStore;
use quizdeck_report::{write_document, write_html_report, GradedAttempt};

use crate::session::{self, Notices, SessionEnd};

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    quiz_id: i64,
    url: Option<String>,
    file: Option<PathBuf>,
    store_path: Option<PathBuf>,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let source = super::resolve_source(url, file, &config);
    let store = super::resolve_store(store_path, &config);
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let formats: Vec<&str> = match format.as_str() {
        "all" => vec!["text", "html"],
        "none" => vec![],
        other => other.split(',').map(str::trim).collect(),
    };

    // Load-error path: message plus the way back, no automatic retry.
    let quiz = match source.fetch_quiz(quiz_id).await {
        Ok(quiz) => quiz,
        Err(e) if e.is_not_found() => {
            anyhow::bail!(
                "quiz {quiz_id} does not exist. Run `quizdeck list` to see available quizzes"
            );
        }
        Err(e) => {
            anyhow::bail!(
                "failed to load quiz {quiz_id}: {e}. Check the source and try again, or run `quizdeck list`"
            );
        }
    };

    let attempt = Attempt::new(quiz);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let end = session::run(attempt, stdin).await?;

    let SessionEnd::Graded(attempt) = end else {
        println!("Attempt abandoned; nothing was recorded.");
        return Ok(());
    };

    let mut notices = Notices::new();

    // A lost record degrades the experience but never the grading.
    if let Some(record) = attempt.outcome() {
        if let Err(e) = store.record(record.clone()) {
            tracing::warn!("failed to persist completion record: {e}");
            notices.push(format!(
                "Your completion record could not be saved ({e}); the results above are not stored."
            ));
        }
    }

    if !formats.is_empty() {
        if let Some(graded) = GradedAttempt::from_attempt(&attempt) {
            let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
            for fmt in &formats {
                let result = match *fmt {
                    "text" => {
                        let path = output.join(format!("quiz-{quiz_id}-results-{timestamp}.txt"));
                        write_document(&graded, &path).map(|()| path)
                    }
                    "html" => {
                        let path = output.join(format!("quiz-{quiz_id}-results-{timestamp}.html"));
                        write_html_report(&graded, &path).map(|()| path)
                    }
                    other => {
                        println!("Unknown format: {other}");
                        continue;
                    }
                };
                match result {
                    Ok(path) => println!("Report saved to: {}", path.display()),
                    Err(e) => {
                        tracing::warn!("failed to write {fmt} report: {e}");
                        notices.push(format!("The {fmt} report could not be written ({e})."));
                    }
                }
            }
        }
    }

    for notice in notices.drain() {
        eprintln!("Notice: {notice}");
    }

    Ok(())
}
