//! quizdeck-report — Exportable result reports.
//!
//! Renders a graded attempt into two artifacts: a paginated plain-text
//! document (the downloadable form) and a print-formatted HTML page. Both
//! derive everything from the same [`GradedAttempt`] input and present
//! identical grading facts; neither touches the network or the store.

pub mod document;
pub mod html;
pub mod input;

pub use document::{generate_document, write_document};
pub use html::{generate_html, write_html_report};
pub use input::GradedAttempt;
