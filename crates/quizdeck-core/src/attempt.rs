//! The attempt state machine.
//!
//! One [`Attempt`] drives a single run through a quiz from preview to graded
//! result. The lifecycle is strictly forward: `NotStarted → InProgress →
//! Graded`. Question order is fixed when the attempt is created — a uniform
//! Fisher–Yates shuffle when the quiz asks for it, ascending display order
//! otherwise — and never changes for the attempt's lifetime.

use chrono::Utc;
use rand::seq::SliceRandom;
use thiserror::Error;
use uuid::Uuid;

use crate::grading::{percentage, score_attempt, Grade};
use crate::model::{AnswerKey, AnswerSheet, CompletionRecord, Question, Quiz};

/// Where an attempt is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// Preview screen: no timer runs, no answers can be recorded.
    NotStarted,
    /// Timer ticks; answers may be recorded and overwritten.
    InProgress,
    /// Terminal: the answer sheet is frozen and results are revealed.
    Graded,
}

/// Errors from operating an [`Attempt`] outside its allowed states.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttemptError {
    /// The attempt has not been started yet.
    #[error("attempt has not been started")]
    NotStarted,

    /// The attempt is already graded; the answer sheet is frozen.
    #[error("attempt is already graded")]
    Graded,

    /// The question id does not belong to this quiz.
    #[error("unknown question id: {0}")]
    UnknownQuestion(i64),
}

/// How one question was answered, revealed after grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionVerdict {
    pub question_id: i64,
    /// What the test-taker selected, if anything.
    pub selected: Option<AnswerKey>,
    /// The correct key, hidden until the attempt is graded.
    pub correct: AnswerKey,
}

impl QuestionVerdict {
    pub fn is_correct(&self) -> bool {
        self.selected == Some(self.correct)
    }
}

/// One run through a quiz, from load to graded result.
pub struct Attempt {
    id: Uuid,
    quiz: Quiz,
    /// Presentation order, fixed at construction.
    order: Vec<usize>,
    answers: AnswerSheet,
    state: AttemptState,
    remaining_secs: u64,
    outcome: Option<CompletionRecord>,
}

impl Attempt {
    /// Create an attempt for a quiz, fixing the question order.
    pub fn new(quiz: Quiz) -> Self {
        let mut order: Vec<usize> = (0..quiz.questions.len()).collect();
        if quiz.shuffle_questions {
            order.shuffle(&mut rand::thread_rng());
        } else {
            order.sort_by_key(|&i| quiz.questions[i].display_order);
        }

        let remaining_secs = quiz.time_limit_secs();
        Self {
            id: Uuid::new_v4(),
            quiz,
            order,
            answers: AnswerSheet::new(),
            state: AttemptState::NotStarted,
            remaining_secs,
            outcome: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    /// Seconds left on the countdown.
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Questions in this attempt's fixed presentation order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.order.iter().map(|&i| &self.quiz.questions[i])
    }

    pub fn question_count(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.answered_count()
    }

    /// The selection recorded for a question, if any.
    pub fn selected(&self, question_id: i64) -> Option<AnswerKey> {
        self.answers.selected(question_id)
    }

    /// The completion record, once graded.
    pub fn outcome(&self) -> Option<&CompletionRecord> {
        self.outcome.as_ref()
    }

    /// Leave the preview screen and start the countdown.
    ///
    /// Only the explicit user action calls this; loading a quiz never starts
    /// the timer on its own. Starting twice is a no-op, and a graded attempt
    /// cannot be restarted.
    pub fn start(&mut self) -> Result<(), AttemptError> {
        match self.state {
            AttemptState::NotStarted => {
                self.state = AttemptState::InProgress;
                tracing::debug!(attempt = %self.id, quiz = self.quiz.id, "attempt started");
                Ok(())
            }
            AttemptState::InProgress => Ok(()),
            AttemptState::Graded => Err(AttemptError::Graded),
        }
    }

    /// Record a selection, overwriting any prior one for the same question.
    ///
    /// Questions may be answered in any order; navigation is never blocked.
    pub fn record_answer(&mut self, question_id: i64, key: AnswerKey) -> Result<(), AttemptError> {
        match self.state {
            AttemptState::NotStarted => return Err(AttemptError::NotStarted),
            AttemptState::Graded => return Err(AttemptError::Graded),
            AttemptState::InProgress => {}
        }
        if !self.quiz.questions.iter().any(|q| q.id == question_id) {
            return Err(AttemptError::UnknownQuestion(question_id));
        }
        self.answers.record(question_id, key);
        Ok(())
    }

    /// Advance the countdown by one second.
    ///
    /// Only an in-progress attempt ticks; the clock saturates at zero and
    /// reaching zero performs an automatic submission identical in effect to
    /// a manual one. Returns the completion record when this tick submitted.
    pub fn tick(&mut self) -> Option<&CompletionRecord> {
        if self.state != AttemptState::InProgress {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            tracing::debug!(attempt = %self.id, "time expired, auto-submitting");
            return self.submit();
        }
        None
    }

    /// Grade the attempt and freeze the answer sheet.
    ///
    /// Idempotent: the first call builds the completion record and returns
    /// it; any later call is a no-op returning `None`. An attempt that was
    /// never started cannot be submitted.
    pub fn submit(&mut self) -> Option<&CompletionRecord> {
        if self.state != AttemptState::InProgress {
            return None;
        }

        let total = self.quiz.questions.len() as u32;
        let score = score_attempt(&self.quiz.questions, &self.answers);
        let pct = percentage(score, total);

        let record = CompletionRecord {
            quiz_id: self.quiz.id,
            title: self.quiz.title.clone(),
            score,
            total,
            percentage: pct,
            grade: Grade::from_percentage(pct),
            completed_at: Utc::now(),
            answers: self.answers.clone(),
        };

        tracing::info!(
            attempt = %self.id,
            quiz = self.quiz.id,
            score,
            total,
            percentage = pct,
            "attempt graded"
        );

        self.state = AttemptState::Graded;
        self.outcome = Some(record);
        self.outcome.as_ref()
    }

    /// Per-question verdicts in presentation order. Empty until graded.
    pub fn verdicts(&self) -> Vec<QuestionVerdict> {
        if self.state != AttemptState::Graded {
            return Vec::new();
        }
        self.questions()
            .map(|q| QuestionVerdict {
                question_id: q.id,
                selected: self.answers.selected(q.id),
                correct: q.correct,
            })
            .collect()
    }
}
