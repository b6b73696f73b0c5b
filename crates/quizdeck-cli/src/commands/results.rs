//! The `quizdeck results` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizdeck_core::store::CompletionStore;

pub fn execute(store_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let store = super::resolve_store(store_path, &config);

    let records = store
        .list()
        .map_err(|e| anyhow::anyhow!("failed to read completion store: {e}"))?;

    if records.is_empty() {
        println!("No completed quizzes yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Quiz", "Title", "Score", "Percentage", "Grade", "Completed"]);

    for record in &records {
        table.add_row(vec![
            Cell::new(record.quiz_id),
            Cell::new(&record.title),
            Cell::new(format!("{}/{}", record.score, record.total)),
            Cell::new(format!("{}%", record.percentage)),
            Cell::new(record.grade),
            Cell::new(record.completed_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    println!("{table}");
    Ok(())
}
