use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::interview::models::{
    EvaluateAnswerRequest, GenerateQuestionsRequest, GenerateQuestionsResponse,
    SimilarityRequest, SimulateInterviewRequest,
};
use crate::interview::validation::{require_question_count, require_text};
use crate::ml_client::models::{EvaluationResult, SimilarityResult, SimulationResult};
use crate::state::AppState;

/// POST /api/v1/interviews/questions/generate
///
/// The only AI endpoint that can fail: a service that answers with nothing
/// usable is reported as 503 rather than padded with invented questions.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(req): Json<GenerateQuestionsRequest>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let resume = require_text("resume_content", &req.resume_content)?;
    let position = require_text("position", &req.position)?;
    let count = require_question_count("question_count", req.question_count)?;

    let questions = state.ml.generate_questions(resume, position, count).await?;
    info!(
        "Generated {} of {} requested questions for '{}'",
        questions.len(),
        count,
        position
    );
    Ok(Json(GenerateQuestionsResponse { questions }))
}

/// POST /api/v1/interviews/answers/evaluate
pub async fn handle_evaluate_answer(
    State(state): State<AppState>,
    Json(req): Json<EvaluateAnswerRequest>,
) -> Result<Json<EvaluationResult>, AppError> {
    let question = require_text("question", &req.question)?;
    let answer = require_text("answer", &req.answer)?;

    let evaluation = state
        .ml
        .evaluate_answer(
            question,
            answer,
            req.resume_content.as_deref(),
            req.cover_letter.as_deref(),
        )
        .await;
    Ok(Json(evaluation))
}

/// POST /api/v1/interviews/similarity/keyword
pub async fn handle_keyword_similarity(
    State(state): State<AppState>,
    Json(req): Json<SimilarityRequest>,
) -> Result<Json<SimilarityResult>, AppError> {
    let resume = require_text("resume_content", &req.resume_content)?;
    let question = require_text("question", &req.question)?;

    Ok(Json(
        state
            .ml
            .keyword_similarity(resume, req.cover_letter.as_deref(), question)
            .await,
    ))
}

/// POST /api/v1/interviews/similarity/semantic
pub async fn handle_semantic_similarity(
    State(state): State<AppState>,
    Json(req): Json<SimilarityRequest>,
) -> Result<Json<SimilarityResult>, AppError> {
    let resume = require_text("resume_content", &req.resume_content)?;
    let question = require_text("question", &req.question)?;

    Ok(Json(
        state
            .ml
            .semantic_similarity(resume, req.cover_letter.as_deref(), question)
            .await,
    ))
}

/// POST /api/v1/interviews/simulate
pub async fn handle_simulate_interview(
    State(state): State<AppState>,
    Json(req): Json<SimulateInterviewRequest>,
) -> Result<Json<SimulationResult>, AppError> {
    let resume = require_text("resume_content", &req.resume_content)?;
    let job_description = require_text("job_description", &req.job_description)?;
    let user_answer = require_text("user_answer", &req.user_answer)?;
    let num_questions = require_question_count("num_questions", req.num_questions)?;

    let result = state
        .ml
        .simulate_interview(
            resume,
            req.cover_letter.as_deref(),
            job_description,
            user_answer,
            num_questions,
        )
        .await;
    Ok(Json(result))
}
