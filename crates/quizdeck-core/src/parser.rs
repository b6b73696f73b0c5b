//! TOML quiz file parser.
//!
//! Loads quizzes from TOML files and directories, validates them, and
//! exposes the result as a [`QuizSource`] so the CLI can run fully offline.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::model::{AnswerKey, Question, Quiz, QuizSummary};
use crate::source::{QuizSource, SourceError};

/// Intermediate TOML structure for parsing quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: i64,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_time_limit")]
    time_limit_minutes: u32,
    #[serde(default)]
    shuffle_questions: bool,
}

fn default_time_limit() -> u32 {
    crate::model::default_time_limit()
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: i64,
    text: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    correct: String,
    #[serde(default)]
    display_order: Option<u32>,
}

/// Parse a single TOML file into a [`Quiz`].
pub fn parse_quiz(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a [`Quiz`] (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<Quiz> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(idx, q)| {
            let correct: AnswerKey = q
                .correct
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;
            Ok(Question {
                id: q.id,
                text: q.text,
                option_a: q.option_a,
                option_b: q.option_b,
                option_c: q.option_c,
                option_d: q.option_d,
                correct,
                // File position is the order when none is given.
                display_order: q.display_order.unwrap_or(idx as u32 + 1),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Quiz {
        id: parsed.quiz.id,
        title: parsed.quiz.title,
        description: parsed.quiz.description,
        time_limit_minutes: parsed.quiz.time_limit_minutes,
        shuffle_questions: parsed.quiz.shuffle_questions,
        questions,
    })
}

/// Recursively load all `.toml` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<Quiz>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            quizzes.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz(&path) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<i64>,
    /// Warning message.
    pub message: String,
}

/// Validate a quiz for common authoring mistakes.
pub fn validate_quiz(quiz: &Quiz) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if quiz.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "quiz has no questions; any attempt grades to 0% / F".into(),
        });
    }

    if quiz.time_limit_minutes == 0 {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "time limit is 0 minutes; attempts expire on the first tick".into(),
        });
    }

    // Check for duplicate question IDs
    let mut seen_ids = std::collections::HashSet::new();
    for question in &quiz.questions {
        if !seen_ids.insert(question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id),
                message: format!("duplicate question id: {}", question.id),
            });
        }
    }

    for question in &quiz.questions {
        if question.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id),
                message: "question text is empty".into(),
            });
        }
        let blank = AnswerKey::ALL
            .iter()
            .any(|&key| question.option(key).trim().is_empty());
        if blank {
            warnings.push(ValidationWarning {
                question_id: Some(question.id),
                message: "one or more options are blank".into(),
            });
        }
    }

    warnings
}

/// A [`QuizSource`] backed by local TOML files.
///
/// Points at either a single quiz file or a directory of them; quizzes are
/// re-read per call so edits show up without restarting.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_all(&self) -> Result<Vec<Quiz>, SourceError> {
        let quizzes = if self.path.is_dir() {
            load_quiz_directory(&self.path)
        } else {
            parse_quiz(&self.path).map(|q| vec![q])
        };
        quizzes.map_err(|e| SourceError::Decode(format!("{e:#}")))
    }
}

#[async_trait]
impl QuizSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_quiz(&self, id: i64) -> Result<Quiz, SourceError> {
        self.load_all()?
            .into_iter()
            .find(|q| q.id == id)
            .ok_or(SourceError::NotFound(id))
    }

    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, SourceError> {
        let mut summaries: Vec<QuizSummary> =
            self.load_all()?.iter().map(Quiz::summary).collect();
        summaries.sort_by_key(|s| s.id);
        Ok(summaries)
    }
}
