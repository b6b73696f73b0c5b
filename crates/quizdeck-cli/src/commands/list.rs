//! The `quizdeck list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizdeck_core::store::CompletionStore;

pub async fn execute(
    url: Option<String>,
    file: Option<PathBuf>,
    store_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let source = super::resolve_source(url, file, &config);
    let store = super::resolve_store(store_path, &config);

    let summaries = source
        .list_quizzes()
        .await
        .map_err(|e| anyhow::anyhow!("failed to list quizzes: {e}"))?;

    if summaries.is_empty() {
        println!("No quizzes available.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Questions", "Time Limit", "Completed"]);

    for summary in &summaries {
        // A lost badge is cosmetic; the list still renders.
        let badge = match store.get(summary.id) {
            Ok(Some(record)) => format!("{}% ({})", record.percentage, record.grade),
            Ok(None) => "-".to_string(),
            Err(e) => {
                tracing::warn!("failed to read completion store: {e}");
                "?".to_string()
            }
        };
        table.add_row(vec![
            Cell::new(summary.id),
            Cell::new(&summary.title),
            Cell::new(summary.question_count),
            Cell::new(format!("{} min", summary.time_limit_minutes)),
            Cell::new(badge),
        ]);
    }

    println!("{table}");
    Ok(())
}
