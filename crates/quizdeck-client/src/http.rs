//! REST quiz source.
//!
//! Talks to the platform's quiz API (`/api/v1/quizzes`). The wire format is
//! camelCase JSON; DTOs here are mapped into the core model so the rest of
//! the system never sees wire names. Every request carries a hard timeout,
//! so a slow response fails the awaiting command instead of landing late.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use quizdeck_core::model::{AnswerKey, Question, Quiz, QuizSummary};
use quizdeck_core::source::{QuizSource, SourceError};

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Quiz source backed by the platform's REST API.
pub struct RestSource {
    base_url: String,
    token: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl RestSource {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self::with_timeout(base_url, token, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, token: Option<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout_secs,
            client,
        }
    }

    fn get(&self, url: String) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn send(&self, url: String) -> Result<reqwest::Response, SourceError> {
        self.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout_secs)
            } else {
                SourceError::Network(e.to_string())
            }
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuizDto {
    quiz_id: i64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    time_limit_minutes: Option<u32>,
    #[serde(default)]
    shuffle_questions: bool,
    #[serde(default)]
    questions: Vec<QuestionDto>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionDto {
    question_id: i64,
    question_text: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    correct_answer: String,
    #[serde(default)]
    question_order: u32,
}

impl QuizDto {
    fn into_quiz(self) -> Result<Quiz, SourceError> {
        let questions = self
            .questions
            .into_iter()
            .map(|q| {
                let correct: AnswerKey = q
                    .correct_answer
                    .parse()
                    .map_err(|e: String| SourceError::Decode(e))?;
                Ok(Question {
                    id: q.question_id,
                    text: q.question_text,
                    option_a: q.option_a,
                    option_b: q.option_b,
                    option_c: q.option_c,
                    option_d: q.option_d,
                    correct,
                    display_order: q.question_order,
                })
            })
            .collect::<Result<Vec<_>, SourceError>>()?;

        Ok(Quiz {
            id: self.quiz_id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            time_limit_minutes: self.time_limit_minutes.unwrap_or(30),
            shuffle_questions: self.shuffle_questions,
            questions,
        })
    }
}

#[async_trait]
impl QuizSource for RestSource {
    fn name(&self) -> &str {
        "rest"
    }

    #[instrument(skip(self), fields(quiz_id = id))]
    async fn fetch_quiz(&self, id: i64) -> Result<Quiz, SourceError> {
        let url = format!("{}/api/v1/quizzes/{}", self.base_url, id);
        let response = self.send(url).await?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(SourceError::NotFound(id));
        }
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError { status, message });
        }

        let dto: QuizDto = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(format!("failed to parse quiz response: {e}")))?;
        dto.into_quiz()
    }

    #[instrument(skip(self))]
    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, SourceError> {
        let url = format!("{}/api/v1/quizzes", self.base_url);
        let response = self.send(url).await?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError { status, message });
        }

        let dtos: Vec<QuizDto> = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(format!("failed to parse quiz list: {e}")))?;

        let mut summaries = Vec::with_capacity(dtos.len());
        for dto in dtos {
            summaries.push(dto.into_quiz()?.summary());
        }
        Ok(summaries)
    }
}
