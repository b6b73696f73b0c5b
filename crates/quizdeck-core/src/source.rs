//! The quiz-source abstraction and its error taxonomy.
//!
//! A [`QuizSource`] hands out quizzes by id. The REST client in
//! `quizdeck-client` and the TOML file loader in [`crate::parser`] both
//! implement it; the error type is defined here so the CLI can classify
//! failures without string matching.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Quiz, QuizSummary};

/// Errors that can occur when looking up a quiz.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No quiz exists with the requested id.
    #[error("quiz not found: {0}")]
    NotFound(i64),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The response (or file) could not be decoded into a quiz.
    #[error("decode error: {0}")]
    Decode(String),
}

impl SourceError {
    /// Returns `true` for the missing-quiz case, which the CLI renders as a
    /// full-page error with a navigation escape hatch instead of a retry.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}

/// Trait for backends that hand out quizzes.
#[async_trait]
pub trait QuizSource: Send + Sync {
    /// Human-readable source name (e.g. "rest", "file").
    fn name(&self) -> &str;

    /// Fetch one quiz with its nested question list.
    async fn fetch_quiz(&self, id: i64) -> Result<Quiz, SourceError>;

    /// List quiz summaries for the list view.
    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, SourceError>;
}
