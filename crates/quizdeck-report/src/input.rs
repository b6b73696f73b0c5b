//! Report input: everything a renderer needs about one graded attempt.

use serde::{Deserialize, Serialize};

use quizdeck_core::attempt::{Attempt, AttemptState};
use quizdeck_core::model::{AnswerKey, CompletionRecord, Question};

/// A graded attempt, flattened for rendering.
///
/// Questions appear in the attempt's presentation order; the completion
/// record carries the grading facts. Both renderers consume this and only
/// this, which is what keeps their grading facts identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedAttempt {
    pub quiz_title: String,
    pub quiz_description: String,
    /// Questions in the order they were presented.
    pub questions: Vec<Question>,
    pub record: CompletionRecord,
}

impl GradedAttempt {
    /// Capture a graded attempt. Returns `None` while the attempt is still
    /// in progress or never started.
    pub fn from_attempt(attempt: &Attempt) -> Option<Self> {
        if attempt.state() != AttemptState::Graded {
            return None;
        }
        let record = attempt.outcome()?.clone();
        Some(Self {
            quiz_title: attempt.quiz().title.clone(),
            quiz_description: attempt.quiz().description.clone(),
            questions: attempt.questions().cloned().collect(),
            record,
        })
    }

    /// The annotation for one option of one question, if any.
    ///
    /// Mirrors the markers a grader would pencil in: the correct answer is
    /// always flagged; the test-taker's selection is flagged as right or
    /// wrong.
    pub fn annotation(&self, question: &Question, key: AnswerKey) -> Option<&'static str> {
        let selected = self.record.answers.selected(question.id) == Some(key);
        let correct = question.correct == key;
        match (selected, correct) {
            (true, true) => Some("your correct answer"),
            (true, false) => Some("your answer"),
            (false, true) => Some("correct answer"),
            (false, false) => None,
        }
    }
}
