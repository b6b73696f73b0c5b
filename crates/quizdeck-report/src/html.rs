//! Print-formatted HTML report.
//!
//! Produces a self-contained HTML file with all CSS inlined and a
//! `window.print()` hook, so opening it immediately offers the native print
//! dialog. Grading facts are taken verbatim from the completion record —
//! the same ones the text document prints.

use anyhow::Result;
use std::path::Path;

use quizdeck_core::grading::encouragement;
use quizdeck_core::model::AnswerKey;

use crate::input::GradedAttempt;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate the print page for a graded attempt.
pub fn generate_html(graded: &GradedAttempt) -> String {
    let record = &graded.record;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Quiz Results — {}</title>\n",
        html_escape(&graded.quiz_title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Quiz Results</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Quiz: <strong>{}</strong> | {} questions | {}</p>\n",
        html_escape(&graded.quiz_title),
        record.total,
        record.completed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if !graded.quiz_description.is_empty() {
        html.push_str(&format!(
            "<p class=\"description\">{}</p>\n",
            html_escape(&graded.quiz_description)
        ));
    }
    html.push_str("</header>\n");

    // Score summary
    html.push_str("<section class=\"summary\">\n");
    html.push_str("<h2>Score Summary</h2>\n");
    html.push_str("<table class=\"summary-table\">\n");
    html.push_str("<tbody>\n");
    html.push_str(&format!(
        "<tr><th>Correct Answers</th><td>{} out of {}</td></tr>\n",
        record.score, record.total
    ));
    html.push_str(&format!(
        "<tr><th>Percentage</th><td>{}%</td></tr>\n",
        record.percentage
    ));
    html.push_str(&format!(
        "<tr><th>Grade</th><td class=\"grade\">{}</td></tr>\n",
        record.grade
    ));
    html.push_str("</tbody></table>\n");
    html.push_str(&format!(
        "<p class=\"encouragement\">{}</p>\n",
        html_escape(encouragement(record.percentage))
    ));
    html.push_str("</section>\n");

    // Questions
    html.push_str("<section class=\"questions\">\n");
    html.push_str("<h2>Questions and Answers</h2>\n");

    for (index, question) in graded.questions.iter().enumerate() {
        let answered_right =
            record.answers.selected(question.id) == Some(question.correct);
        let card_class = if answered_right { "correct" } else { "incorrect" };

        html.push_str(&format!("<article class=\"question {card_class}\">\n"));
        html.push_str(&format!(
            "<h3>Question {} of {}</h3>\n",
            index + 1,
            record.total
        ));
        html.push_str(&format!("<p>{}</p>\n", html_escape(&question.text)));
        html.push_str("<ul class=\"options\">\n");

        for key in AnswerKey::ALL {
            let marker = graded.annotation(question, key);
            let class = match marker {
                Some("your correct answer") | Some("correct answer") => " class=\"right\"",
                Some("your answer") => " class=\"wrong\"",
                _ => "",
            };
            let suffix = marker
                .map(|m| format!(" <em>({m})</em>"))
                .unwrap_or_default();
            html.push_str(&format!(
                "<li{class}><span class=\"letter\">{key}.</span> {}{suffix}</li>\n",
                html_escape(question.option(key)),
            ));
        }

        html.push_str("</ul>\n</article>\n");
    }

    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(graded)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // Open the native print dialog once rendered
    html.push_str("<script>window.addEventListener('load', () => window.print());</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write the print page to a file, creating parent directories.
pub fn write_html_report(graded: &GradedAttempt, path: &Path) -> Result<()> {
    let html = generate_html(graded);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); max-width: 48rem; margin: 0 auto; }
h1, h2 { margin-top: 2rem; }
.meta, .description { color: #6b7280; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
.grade { font-weight: 700; font-size: 1.25rem; }
.encouragement { font-style: italic; }
.question { border: 1px solid var(--border); border-radius: 6px; padding: 0.5rem 1rem; margin: 1rem 0; page-break-inside: avoid; }
.question.correct { background: var(--pass); }
.question.incorrect { background: var(--fail); }
.options { list-style: none; padding-left: 0; }
.options li { padding: 0.25rem 0; }
.options li.right { font-weight: 600; }
.options li.wrong { text-decoration: line-through; }
.letter { display: inline-block; width: 1.5rem; }
.raw-data pre { background: #f3f4f6; padding: 1rem; overflow-x: auto; }
@media print {
  body { padding: 0; }
  .raw-data { display: none; }
}
"#;
