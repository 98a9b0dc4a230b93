//! Helpers for tests that need a stand-in AI service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{body::Body, http::Response, Router};
use serde_json::Value;
use tokio::net::TcpListener;

use crate::ml_client::models::{
    EvaluationResult, QuestionDraft, SimilarityResult, SimulationResult,
};
use crate::ml_client::{fallback, InterviewAi, MlClient, MlClientConfig, MlError};
use crate::state::AppState;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn client_for(base_url: &str) -> MlClient {
    client_with_key(base_url, None)
}

pub fn client_with_key(base_url: &str, api_key: Option<&str>) -> MlClient {
    MlClient::new(MlClientConfig {
        base_url: base_url.to_string(),
        api_key: api_key.map(str::to_string),
        connect_timeout: Duration::from_millis(500),
        request_timeout: Duration::from_millis(750),
    })
    .unwrap()
}

/// In-memory `InterviewAi` answering with the deterministic fallback values.
#[derive(Debug, Clone, Default)]
pub struct FakeAi {
    pub fail_generation: bool,
    pub unhealthy: bool,
}

#[async_trait]
impl InterviewAi for FakeAi {
    async fn generate_questions(
        &self,
        _resume: &str,
        _position: &str,
        count: u32,
    ) -> Result<Vec<QuestionDraft>, MlError> {
        if self.fail_generation {
            return Err(MlError::GenerationFailed("no usable questions".to_string()));
        }
        Ok(fallback::questions(count))
    }

    async fn evaluate_answer(
        &self,
        _question: &str,
        _answer: &str,
        _resume: Option<&str>,
        _cover_letter: Option<&str>,
    ) -> EvaluationResult {
        fallback::evaluation()
    }

    async fn keyword_similarity(
        &self,
        _resume: &str,
        _cover_letter: Option<&str>,
        _question: &str,
    ) -> SimilarityResult {
        fallback::keyword_similarity()
    }

    async fn semantic_similarity(
        &self,
        _resume: &str,
        _cover_letter: Option<&str>,
        _question: &str,
    ) -> SimilarityResult {
        fallback::semantic_similarity()
    }

    async fn simulate_interview(
        &self,
        _resume: &str,
        _cover_letter: Option<&str>,
        _job_description: &str,
        _user_answer: &str,
        _num_questions: u32,
    ) -> SimulationResult {
        fallback::simulation()
    }

    async fn is_server_healthy(&self) -> bool {
        !self.unhealthy
    }
}

pub fn fake_state(fake: FakeAi) -> AppState {
    AppState { ml: Arc::new(fake) }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
