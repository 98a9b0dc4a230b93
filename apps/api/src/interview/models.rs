use serde::{Deserialize, Serialize};

use crate::ml_client::models::QuestionDraft;

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub resume_content: String,
    pub position: String,
    pub question_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: Vec<QuestionDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateAnswerRequest {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub resume_content: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimilarityRequest {
    pub resume_content: String,
    #[serde(default)]
    pub cover_letter: Option<String>,
    pub question: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulateInterviewRequest {
    pub resume_content: String,
    #[serde(default)]
    pub cover_letter: Option<String>,
    pub job_description: String,
    pub user_answer: String,
    pub num_questions: u32,
}
