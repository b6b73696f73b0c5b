//! Percentage and letter-grade scoring.
//!
//! Pure functions from (score, total) to a percentage, a letter grade, and
//! an encouragement message. The grade scale is a fixed step function with
//! inclusive boundaries: exactly 90% is an A+, exactly 89% is an A.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{AnswerSheet, Question};

/// Letter grades from A+ down to F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    D,
    F,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

impl Grade {
    /// The grade letter as written on a report.
    pub fn letter(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// Map a percentage to its letter grade.
    ///
    /// Thresholds descend in 5-point steps from 90 to 40; anything below 40
    /// is an F. Boundaries are inclusive.
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            90.. => Grade::APlus,
            85..=89 => Grade::A,
            80..=84 => Grade::AMinus,
            75..=79 => Grade::BPlus,
            70..=74 => Grade::B,
            65..=69 => Grade::BMinus,
            60..=64 => Grade::CPlus,
            55..=59 => Grade::C,
            50..=54 => Grade::CMinus,
            45..=49 => Grade::DPlus,
            40..=44 => Grade::D,
            _ => Grade::F,
        }
    }

    /// Whether the grade counts as a pass (D or better).
    pub fn is_passing(&self) -> bool {
        !matches!(self, Grade::F)
    }
}

/// round(100 * score / total), or 0 when the quiz had no questions.
pub fn percentage(score: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (f64::from(score) / f64::from(total) * 100.0).round();
    // score <= total keeps this in 0..=100
    pct as u8
}

/// Count the questions whose recorded answer equals the correct key.
pub fn score_attempt(questions: &[Question], answers: &AnswerSheet) -> u32 {
    questions
        .iter()
        .filter(|q| answers.selected(q.id) == Some(q.correct))
        .count() as u32
}

/// The encouragement line printed under the score summary.
pub fn encouragement(percentage: u8) -> &'static str {
    match percentage {
        90.. => "Outstanding! You have mastered this topic completely!",
        80..=89 => "Excellent work! You have a strong understanding of the material.",
        70..=79 => "Great job! You have a good grasp of the concepts.",
        60..=69 => "Good effort! You understand most of the material well.",
        50..=59 => "Not bad! You have a basic understanding, keep studying!",
        40..=49 => "Keep working hard! Review the material and try again.",
        _ => "Don't give up! Study the material thoroughly and retake the quiz.",
    }
}
