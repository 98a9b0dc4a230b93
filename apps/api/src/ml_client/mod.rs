//! ML Client: the single point of contact with the external AI service.
//!
//! Every outbound call is one best-effort attempt: no retries, no backoff.
//! Each operation funnels through `post_json`, which returns a plain
//! `Result<T, MlError>`; what happens on failure is decided per operation by
//! matching on the error kind:
//!
//! - question generation surfaces every error except `Network`, which is
//!   replaced by canned questions;
//! - evaluation, similarity and simulation never fail and degrade to
//!   deterministic fallback values.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{header, redirect, Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

pub mod fallback;
pub mod models;

use models::{
    EvaluationRequest, EvaluationResponse, EvaluationResult, QuestionDraft, QuestionRequest,
    QuestionType, QuestionsResponse, RawQuestion, SimilarityRequest, SimilarityResult,
    SimulationRequest, SimulationResponse, SimulationResult,
};

/// API key value that means "no key configured".
pub const PLACEHOLDER_API_KEY: &str = "dummy-api-key";

const DEFAULT_QUESTION_DIFFICULTY: i32 = 1;

#[derive(Debug, Error)]
pub enum MlError {
    #[error("AI service unreachable: {0}")]
    Network(#[source] reqwest::Error),

    #[error("AI service rejected the request (status {status}): {body}")]
    ClientRequest { status: u16, body: String },

    #[error("AI service failed (status {status}): {body}")]
    Server { status: u16, body: String },

    #[error("Could not parse AI service response: {0}")]
    ResponseParsing(String),

    #[error("Question generation failed: {0}")]
    GenerationFailed(String),
}

impl MlError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            MlError::Network(_) => "ML_CONNECTION_FAILED",
            MlError::ClientRequest { .. } => "ML_BAD_REQUEST",
            MlError::Server { .. } => "ML_SERVER_ERROR",
            MlError::ResponseParsing(_) => "ML_RESPONSE_PARSING_FAILED",
            MlError::GenerationFailed(_) => "QUESTION_GENERATION_FAILED",
        }
    }
}

/// Operations the interview flow needs from the AI service.
///
/// `AppState` carries this as `Arc<dyn InterviewAi>`; `MlClient` is the
/// production implementation.
#[async_trait]
pub trait InterviewAi: Send + Sync {
    async fn generate_questions(
        &self,
        resume: &str,
        position: &str,
        count: u32,
    ) -> Result<Vec<QuestionDraft>, MlError>;

    async fn evaluate_answer(
        &self,
        question: &str,
        answer: &str,
        resume: Option<&str>,
        cover_letter: Option<&str>,
    ) -> EvaluationResult;

    async fn keyword_similarity(
        &self,
        resume: &str,
        cover_letter: Option<&str>,
        question: &str,
    ) -> SimilarityResult;

    async fn semantic_similarity(
        &self,
        resume: &str,
        cover_letter: Option<&str>,
        question: &str,
    ) -> SimilarityResult;

    async fn simulate_interview(
        &self,
        resume: &str,
        cover_letter: Option<&str>,
        job_description: &str,
        user_answer: &str,
        num_questions: u32,
    ) -> SimulationResult;

    async fn is_server_healthy(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct MlClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

#[derive(Clone)]
pub struct MlClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl MlClient {
    pub fn new(config: MlClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .redirect(redirect::Policy::none())
            .build()
            .context("Failed to build HTTP client for the AI service")?;

        let api_key = config
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty() && k != PLACEHOLDER_API_KEY);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POSTs `body` as JSON and decodes a 2xx JSON object response into `T`.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, MlError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("AI service request: POST {url}");

        let mut request = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(MlError::Network)?;
        let status = response.status();
        debug!("AI service response: POST {url} -> {status}");

        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(if status.is_client_error() {
                MlError::ClientRequest {
                    status: status.as_u16(),
                    body,
                }
            } else {
                MlError::Server {
                    status: status.as_u16(),
                    body,
                }
            });
        }

        if !status.is_success() {
            return Err(MlError::ResponseParsing(format!(
                "unexpected status {status}"
            )));
        }

        let bytes = response.bytes().await.map_err(MlError::Network)?;
        let value: Value =
            serde_json::from_slice(&bytes).map_err(|e| MlError::ResponseParsing(e.to_string()))?;
        // Derived struct deserializers also accept arrays positionally
        if !value.is_object() {
            return Err(MlError::ResponseParsing(
                "response body is not a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| MlError::ResponseParsing(e.to_string()))
    }
}

#[async_trait]
impl InterviewAi for MlClient {
    async fn generate_questions(
        &self,
        resume: &str,
        position: &str,
        count: u32,
    ) -> Result<Vec<QuestionDraft>, MlError> {
        info!("Requesting {count} interview questions for position '{position}'");

        let body = QuestionRequest {
            resume,
            position,
            question_count: count,
        };
        let outcome = self
            .post_json::<_, QuestionsResponse>("/interview/questions", &body)
            .await
            .and_then(parse_questions);

        match &outcome {
            Ok(drafts) => info!("AI service generated {} questions", drafts.len()),
            Err(MlError::Network(_)) => {}
            Err(e) => error!("Question generation failed: {e}"),
        }
        resolve_questions(outcome, count)
    }

    async fn evaluate_answer(
        &self,
        question: &str,
        answer: &str,
        resume: Option<&str>,
        cover_letter: Option<&str>,
    ) -> EvaluationResult {
        info!(
            "Requesting answer evaluation (question {} chars, answer {} chars)",
            question.chars().count(),
            answer.chars().count()
        );

        let body = EvaluationRequest {
            question,
            answer,
            resume: resume.unwrap_or_default(),
            cover_letter: cover_letter.unwrap_or_default(),
        };
        match self
            .post_json::<_, EvaluationResponse>("/evaluate", &body)
            .await
        {
            Ok(resp) => {
                let result = into_evaluation(resp);
                info!("Answer evaluated: total score {}", result.total_score);
                result
            }
            Err(e) => {
                warn!("Answer evaluation failed, using fallback: {e}");
                fallback::evaluation()
            }
        }
    }

    async fn keyword_similarity(
        &self,
        resume: &str,
        cover_letter: Option<&str>,
        question: &str,
    ) -> SimilarityResult {
        let body = SimilarityRequest {
            resume,
            cover_letter: cover_letter.unwrap_or_default(),
            question,
        };
        self.post_json("/similarity/keyword", &body)
            .await
            .unwrap_or_else(|e| {
                warn!("Keyword similarity failed, using fallback: {e}");
                fallback::keyword_similarity()
            })
    }

    async fn semantic_similarity(
        &self,
        resume: &str,
        cover_letter: Option<&str>,
        question: &str,
    ) -> SimilarityResult {
        let body = SimilarityRequest {
            resume,
            cover_letter: cover_letter.unwrap_or_default(),
            question,
        };
        self.post_json("/similarity/semantic", &body)
            .await
            .unwrap_or_else(|e| {
                warn!("Semantic similarity failed, using fallback: {e}");
                fallback::semantic_similarity()
            })
    }

    async fn simulate_interview(
        &self,
        resume: &str,
        cover_letter: Option<&str>,
        job_description: &str,
        user_answer: &str,
        num_questions: u32,
    ) -> SimulationResult {
        info!("Requesting interview simulation with {num_questions} questions");

        let body = SimulationRequest {
            resume,
            cover_letter: cover_letter.unwrap_or_default(),
            job_description,
            user_answer,
            num_questions,
        };
        match self
            .post_json::<_, SimulationResponse>("/simulate/simulate", &body)
            .await
        {
            Ok(resp) => SimulationResult {
                generated_questions: resp.generated_questions,
                selected_question: resp.selected_question.unwrap_or_default(),
                user_answer: resp.user_answer.unwrap_or_default(),
                evaluation_result: resp.evaluation_result.map(into_evaluation),
            },
            Err(e) => {
                warn!("Interview simulation failed, using fallback: {e}");
                fallback::simulation()
            }
        }
    }

    async fn is_server_healthy(&self) -> bool {
        match self.client.get(self.url("/health")).send().await {
            Ok(response) => {
                let healthy = response.status() == StatusCode::OK;
                debug!("AI service health check: healthy={healthy}");
                healthy
            }
            Err(e) => {
                warn!("AI service health check failed: {e}");
                false
            }
        }
    }
}

/// Question-generation failure policy: only an unreachable service is
/// papered over with canned questions.
fn resolve_questions(
    outcome: Result<Vec<QuestionDraft>, MlError>,
    count: u32,
) -> Result<Vec<QuestionDraft>, MlError> {
    match outcome {
        Err(MlError::Network(_)) => {
            warn!("AI service unreachable, serving fallback questions");
            Ok(fallback::questions(count))
        }
        other => other,
    }
}

/// Converts a decoded `questions` batch into drafts, numbering the kept ones.
fn parse_questions(response: QuestionsResponse) -> Result<Vec<QuestionDraft>, MlError> {
    if response.questions.is_empty() {
        return Err(MlError::GenerationFailed(
            "AI service returned no questions".to_string(),
        ));
    }

    let mut drafts = Vec::with_capacity(response.questions.len());
    for (index, value) in response.questions.into_iter().enumerate() {
        if !value.is_object() {
            warn!("Skipping question #{index}: not an object");
            continue;
        }
        let raw: RawQuestion = match serde_json::from_value(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Skipping question #{index}: {e}");
                continue;
            }
        };
        let sequence = drafts.len() as u32 + 1;
        match into_draft(raw, sequence) {
            Some(draft) => drafts.push(draft),
            None => warn!("Skipping question #{index}: missing or blank content"),
        }
    }

    if drafts.is_empty() {
        return Err(MlError::GenerationFailed(
            "AI service returned no usable questions".to_string(),
        ));
    }
    Ok(drafts)
}

fn into_draft(raw: RawQuestion, sequence: u32) -> Option<QuestionDraft> {
    let content = raw.content?.trim().to_string();
    if content.is_empty() {
        return None;
    }

    let question_type = match raw.question_type.as_deref() {
        Some(s) => QuestionType::parse(s).unwrap_or_else(|| {
            warn!("Unknown question type '{s}', defaulting to TECHNICAL");
            QuestionType::Technical
        }),
        None => QuestionType::Technical,
    };

    Some(QuestionDraft {
        content,
        category: raw
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| fallback::FALLBACK_CATEGORY.to_string()),
        question_type,
        difficulty_level: raw.difficulty_level.unwrap_or(DEFAULT_QUESTION_DIFFICULTY),
        sequence,
    })
}

fn into_evaluation(resp: EvaluationResponse) -> EvaluationResult {
    EvaluationResult {
        relevance: resp.relevance.unwrap_or(0),
        specificity: resp.specificity.unwrap_or(0),
        practicality: resp.practicality.unwrap_or(0),
        validity: resp.validity.unwrap_or(0),
        total_score: resp.total_score.unwrap_or(0),
        feedback: resp
            .feedback
            .unwrap_or_else(|| fallback::DEFAULT_FEEDBACK.to_string()),
        evaluation_type: fallback::EVALUATION_TYPE_AI.to_string(),
    }
}
