//! Wire and domain types exchanged with the AI service.
//!
//! Response structs are deserialized in a single step per endpoint. Fields the
//! service may send with the wrong JSON type go through the `lenient_*`
//! helpers, which turn anything unusable into `None` instead of failing the
//! whole body.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ────────────────────────────────────────────────────────────────────────────
// Domain types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Technical,
    Personality,
    Project,
    Situation,
}

impl QuestionType {
    /// Case-insensitive match against the known names. `None` when unrecognised.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "TECHNICAL" => Some(QuestionType::Technical),
            "PERSONALITY" => Some(QuestionType::Personality),
            "PROJECT" => Some(QuestionType::Project),
            "SITUATION" => Some(QuestionType::Situation),
            _ => None,
        }
    }
}

/// An interview question produced by the AI service, not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub content: String,
    pub category: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub difficulty_level: i32,
    /// 1-based position among the drafts kept from one response.
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub relevance: i32,
    pub specificity: i32,
    pub practicality: i32,
    pub validity: i32,
    pub total_score: i32,
    pub feedback: String,
    pub evaluation_type: String,
}

/// Similarity payload, passed through exactly as the service returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimilarityResult(pub Map<String, Value>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub generated_questions: Vec<String>,
    pub selected_question: String,
    pub user_answer: String,
    pub evaluation_result: Option<EvaluationResult>,
}

// ────────────────────────────────────────────────────────────────────────────
// Request bodies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct QuestionRequest<'a> {
    pub resume: &'a str,
    pub position: &'a str,
    #[serde(rename = "questionCount")]
    pub question_count: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluationRequest<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub resume: &'a str,
    pub cover_letter: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SimilarityRequest<'a> {
    pub resume: &'a str,
    pub cover_letter: &'a str,
    pub question: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SimulationRequest<'a> {
    pub resume: &'a str,
    pub cover_letter: &'a str,
    pub job_description: &'a str,
    pub user_answer: &'a str,
    pub num_questions: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Response bodies
// ────────────────────────────────────────────────────────────────────────────

/// `POST /interview/questions`. Elements stay raw so one malformed entry
/// cannot sink the rest of the batch.
#[derive(Debug, Deserialize)]
pub(crate) struct QuestionsResponse {
    pub questions: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawQuestion {
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub question_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, rename = "difficultyLevel", deserialize_with = "lenient_int")]
    pub difficulty_level: Option<i32>,
}

/// `POST /evaluate`. The key names are fixed by the AI service.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EvaluationResponse {
    #[serde(default, rename = "관련성", deserialize_with = "lenient_int")]
    pub relevance: Option<i32>,
    #[serde(default, rename = "구체성", deserialize_with = "lenient_int")]
    pub specificity: Option<i32>,
    #[serde(default, rename = "실무성", deserialize_with = "lenient_int")]
    pub practicality: Option<i32>,
    #[serde(default, rename = "유효성", deserialize_with = "lenient_int")]
    pub validity: Option<i32>,
    #[serde(default, rename = "총점", deserialize_with = "lenient_int")]
    pub total_score: Option<i32>,
    #[serde(default, rename = "피드백", deserialize_with = "lenient_string")]
    pub feedback: Option<String>,
}

/// `POST /simulate/simulate`.
#[derive(Debug, Deserialize)]
pub(crate) struct SimulationResponse {
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub generated_questions: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub selected_question: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_answer: Option<String>,
    #[serde(default, deserialize_with = "optional_evaluation")]
    pub evaluation_result: Option<EvaluationResponse>,
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field deserializers
// ────────────────────────────────────────────────────────────────────────────

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_int(&value))
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            // The question generator sometimes returns full question objects here
            Value::Object(mut obj) => match obj.remove("content") {
                Some(Value::String(s)) => Some(s),
                _ => None,
            },
            _ => None,
        })
        .collect())
}

/// `null` means absent. Anything else that is not an object fails the body.
fn optional_evaluation<'de, D>(deserializer: D) -> Result<Option<EvaluationResponse>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value @ Value::Object(_) => EvaluationResponse::deserialize(value)
            .map(Some)
            .map_err(D::Error::custom),
        _ => Err(D::Error::custom("evaluation_result is not an object")),
    }
}

/// Integer from a JSON number or a numeric string. Fractions are truncated.
pub(crate) fn coerce_int(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .and_then(|i| i32::try_from(i).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}
