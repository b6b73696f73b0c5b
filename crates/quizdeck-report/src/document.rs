//! Paginated plain-text report.
//!
//! The downloadable document form: a fixed number of content lines per
//! page, each page closed with a `Page i of n` footer. Layout only — every
//! grading fact comes straight from the completion record.

use std::path::Path;

use anyhow::Result;

use quizdeck_core::grading::encouragement;
use quizdeck_core::model::AnswerKey;

use crate::input::GradedAttempt;

const PAGE_WIDTH: usize = 72;
const LINES_PER_PAGE: usize = 48;

/// Generate the paginated text document for a graded attempt.
pub fn generate_document(graded: &GradedAttempt) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Title banner
    lines.push("=".repeat(PAGE_WIDTH));
    lines.push(center("QUIZ RESULTS"));
    lines.push("=".repeat(PAGE_WIDTH));
    lines.push(String::new());

    // Quiz information
    lines.push(format!("Quiz: {}", graded.quiz_title));
    if graded.quiz_description.is_empty() {
        lines.push("Description: No description provided".to_string());
    } else {
        lines.push(format!("Description: {}", graded.quiz_description));
    }
    lines.push(String::new());

    // Score summary
    let record = &graded.record;
    lines.push("SCORE SUMMARY".to_string());
    lines.push("-".repeat(PAGE_WIDTH));
    lines.push(format!(
        "Correct Answers: {} out of {}",
        record.score, record.total
    ));
    lines.push(format!("Percentage: {}%", record.percentage));
    lines.push(format!("Grade: {}", record.grade));
    lines.push(encouragement(record.percentage).to_string());
    lines.push(String::new());

    // Questions and answers
    lines.push("QUESTIONS AND ANSWERS".to_string());
    lines.push("-".repeat(PAGE_WIDTH));

    for (index, question) in graded.questions.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("Question {}:", index + 1));
        lines.push(format!("  {}", question.text));
        for key in AnswerKey::ALL {
            let mut line = format!("    {key}. {}", question.option(key));
            if let Some(marker) = graded.annotation(question, key) {
                line.push_str(&format!("  ({marker})"));
            }
            lines.push(line);
        }
    }

    paginate(&lines, record.completed_at.format("%Y-%m-%d").to_string())
}

fn center(text: &str) -> String {
    if text.len() >= PAGE_WIDTH {
        return text.to_string();
    }
    let pad = (PAGE_WIDTH - text.len()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Split content lines into fixed-height pages with footers.
fn paginate(lines: &[String], generated_on: String) -> String {
    let page_count = lines.len().div_ceil(LINES_PER_PAGE).max(1);
    let mut out = String::new();

    for (page_index, chunk) in lines.chunks(LINES_PER_PAGE).enumerate() {
        for line in chunk {
            out.push_str(line);
            out.push('\n');
        }
        // Pad the last page so footers line up when printed.
        for _ in chunk.len()..LINES_PER_PAGE {
            out.push('\n');
        }
        out.push_str(&format!(
            "Generated on {generated_on}{}Page {} of {}\n",
            " ".repeat(
                PAGE_WIDTH.saturating_sub(
                    "Generated on ".len()
                        + generated_on.len()
                        + format!("Page {} of {}", page_index + 1, page_count).len()
                )
            ),
            page_index + 1,
            page_count
        ));
        if page_index + 1 < page_count {
            out.push('\x0C');
        }
    }

    out
}

/// Write the text document to a file, creating parent directories.
pub fn write_document(graded: &GradedAttempt, path: &Path) -> Result<()> {
    let document = generate_document(graded);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, document)?;
    Ok(())
}
