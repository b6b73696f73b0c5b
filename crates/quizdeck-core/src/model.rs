//! Core data model types for quizdeck.
//!
//! These are the fundamental types that the entire quizdeck system uses
//! to represent quizzes, questions, answer sheets, and completion records.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grading::Grade;

/// A multiple-choice quiz with an ordered collection of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique identifier for this quiz.
    pub id: i64,
    /// Human-readable title.
    pub title: String,
    /// Description shown on the preview screen.
    #[serde(default)]
    pub description: String,
    /// Time limit for one attempt, in minutes.
    #[serde(default = "default_time_limit")]
    pub time_limit_minutes: u32,
    /// Whether question order is randomized once per attempt.
    #[serde(default)]
    pub shuffle_questions: bool,
    /// The questions in this quiz.
    #[serde(default)]
    pub questions: Vec<Question>,
}

pub(crate) fn default_time_limit() -> u32 {
    30
}

impl Quiz {
    /// The countdown length for one attempt, in seconds.
    pub fn time_limit_secs(&self) -> u64 {
        u64::from(self.time_limit_minutes) * 60
    }

    /// Project this quiz into its list-view summary.
    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            id: self.id,
            title: self.title.clone(),
            question_count: self.questions.len(),
            time_limit_minutes: self.time_limit_minutes,
        }
    }
}

/// A single question with four options, one of which is correct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier for this question.
    pub id: i64,
    /// The question text.
    pub text: String,
    /// Option A.
    pub option_a: String,
    /// Option B.
    pub option_b: String,
    /// Option C.
    pub option_c: String,
    /// Option D.
    pub option_d: String,
    /// The correct option letter.
    pub correct: AnswerKey,
    /// Position when the quiz is presented sequentially.
    #[serde(default)]
    pub display_order: u32,
}

impl Question {
    /// The option text for a given key.
    pub fn option(&self, key: AnswerKey) -> &str {
        match key {
            AnswerKey::A => &self.option_a,
            AnswerKey::B => &self.option_b,
            AnswerKey::C => &self.option_c,
            AnswerKey::D => &self.option_d,
        }
    }
}

/// The four selectable option letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
}

impl AnswerKey {
    /// All keys in presentation order.
    pub const ALL: [AnswerKey; 4] = [AnswerKey::A, AnswerKey::B, AnswerKey::C, AnswerKey::D];
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerKey::A => write!(f, "A"),
            AnswerKey::B => write!(f, "B"),
            AnswerKey::C => write!(f, "C"),
            AnswerKey::D => write!(f, "D"),
        }
    }
}

impl FromStr for AnswerKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(AnswerKey::A),
            "B" => Ok(AnswerKey::B),
            "C" => Ok(AnswerKey::C),
            "D" => Ok(AnswerKey::D),
            other => Err(format!("unknown option letter: {other}")),
        }
    }
}

/// The answers recorded during one attempt, keyed by question id.
///
/// Recording an answer for a question overwrites any previous selection for
/// that question. Keys are unique; iteration order is not meaningful.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerSheet {
    selections: HashMap<i64, AnswerKey>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selection, replacing any prior one for the same question.
    pub fn record(&mut self, question_id: i64, key: AnswerKey) {
        self.selections.insert(question_id, key);
    }

    /// The recorded selection for a question, if any.
    pub fn selected(&self, question_id: i64) -> Option<AnswerKey> {
        self.selections.get(&question_id).copied()
    }

    /// Number of questions with a recorded selection.
    pub fn answered_count(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

/// The persisted outcome of a graded attempt.
///
/// At most one record exists per quiz id; a newer completion replaces the
/// prior one. Created only by submission (manual or time expiry), never
/// partially.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// The quiz this record belongs to.
    pub quiz_id: i64,
    /// Quiz title at completion time.
    pub title: String,
    /// Count of correctly answered questions.
    pub score: u32,
    /// Total question count.
    pub total: u32,
    /// round(100 * score / total), 0 when the quiz had no questions.
    pub percentage: u8,
    /// Letter grade derived from the percentage.
    pub grade: Grade,
    /// When the attempt was graded.
    pub completed_at: DateTime<Utc>,
    /// The frozen answer sheet.
    pub answers: AnswerSheet,
}

/// List-view projection of a quiz, without its questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: i64,
    pub title: String,
    pub question_count: usize,
    pub time_limit_minutes: u32,
}
