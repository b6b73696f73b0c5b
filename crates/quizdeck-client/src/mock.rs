//! Mock quiz source for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use quizdeck_core::model::{Quiz, QuizSummary};
use quizdeck_core::source::{QuizSource, SourceError};

/// An in-memory quiz source for testing attempt flows without a server.
pub struct MockSource {
    quizzes: HashMap<i64, Quiz>,
    /// Number of fetch calls made.
    fetch_count: AtomicU32,
}

impl MockSource {
    /// Create a mock source serving the given quizzes.
    pub fn new(quizzes: Vec<Quiz>) -> Self {
        Self {
            quizzes: quizzes.into_iter().map(|q| (q.id, q)).collect(),
            fetch_count: AtomicU32::new(0),
        }
    }

    /// Create an empty source where every lookup misses.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Get the number of fetch calls made against this source.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl QuizSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_quiz(&self, id: i64) -> Result<Quiz, SourceError> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        self.quizzes
            .get(&id)
            .cloned()
            .ok_or(SourceError::NotFound(id))
    }

    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, SourceError> {
        let mut summaries: Vec<QuizSummary> =
            self.quizzes.values().map(Quiz::summary).collect();
        summaries.sort_by_key(|s| s.id);
        Ok(summaries)
    }
}
