//! HTTP question service adapter
//!
//! Implements the QuestionServicePort against the interview backend's JSON
//! API: `/next-question` for the next round, `/evaluate` for the
//! end-of-session feedback. Both take the answer history plus the static
//! interview domain label.

use crate::error::{AppError, Result};
use crate::ports::questions::QuestionServicePort;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Question service implementation over HTTP
pub struct HttpQuestionService {
    client: Client,
    base_url: String,
    domain: String,
}

impl HttpQuestionService {
    /// Create a new client for the service at `base_url`, asking questions
    /// for the given interview domain
    pub fn new(base_url: &str, domain: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            domain: domain.to_string(),
        }
    }

    async fn post(&self, path: &str, answers: &[String]) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let body = InterviewTurns {
            answers,
            domain: &self.domain,
        };

        log::info!("Calling question service: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::QuestionFetch(format!("Request to {} failed: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::QuestionFetch(format!(
                "Question service error ({}): {}",
                status, error_text
            )));
        }

        Ok(response)
    }

    /// Validates the question payload: the field must be present and non-empty
    fn parse_question(payload: NextQuestionResponse) -> Result<String> {
        match payload.question {
            Some(question) if !question.trim().is_empty() => Ok(question),
            Some(_) => Err(AppError::QuestionFetch(
                "service returned an empty question".to_string(),
            )),
            None => Err(AppError::QuestionFetch(
                "service response is missing the question field".to_string(),
            )),
        }
    }

    fn parse_evaluation(payload: EvaluationResponse) -> Result<String> {
        match payload.evaluation {
            Some(evaluation) if !evaluation.trim().is_empty() => Ok(evaluation),
            _ => Err(AppError::QuestionFetch(
                "service response is missing the evaluation field".to_string(),
            )),
        }
    }
}

#[async_trait]
impl QuestionServicePort for HttpQuestionService {
    async fn next_question(&self, answers: &[String]) -> Result<String> {
        let response = self.post("/next-question", answers).await?;

        let payload: NextQuestionResponse = response
            .json()
            .await
            .map_err(|e| AppError::QuestionFetch(format!("Failed to parse question response: {}", e)))?;

        let question = Self::parse_question(payload)?;
        log::info!("Received question ({} chars)", question.len());
        Ok(question)
    }

    async fn evaluate(&self, answers: &[String]) -> Result<String> {
        let response = self.post("/evaluate", answers).await?;

        let payload: EvaluationResponse = response.json().await.map_err(|e| {
            AppError::QuestionFetch(format!("Failed to parse evaluation response: {}", e))
        })?;

        Self::parse_evaluation(payload)
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}

// ===== API Request/Response Types =====

#[derive(Debug, Serialize)]
struct InterviewTurns<'a> {
    answers: &'a [String],
    domain: &'a str,
}

#[derive(Debug, Deserialize)]
struct NextQuestionResponse {
    question: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EvaluationResponse {
    evaluation: Option<String>,
}
