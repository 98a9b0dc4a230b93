//! Deterministic substitutes used when the AI service cannot answer.

use serde_json::{json, Map, Value};

use crate::ml_client::models::{
    EvaluationResult, QuestionDraft, QuestionType, SimilarityResult, SimulationResult,
};

pub const FALLBACK_CATEGORY: &str = "general";
pub const FALLBACK_DIFFICULTY: i32 = 2;

pub const EVALUATION_TYPE_AI: &str = "AI";
pub const EVALUATION_TYPE_FALLBACK: &str = "FALLBACK";

/// Feedback used when the service scores an answer but omits the text.
pub const DEFAULT_FEEDBACK: &str = "Evaluation completed.";

const FALLBACK_FEEDBACK: &str =
    "Your answer was submitted. A detailed evaluation will be available shortly.";

const SIMULATION_PLACEHOLDER: &str = "Interview simulation questions are being prepared.";

pub const FALLBACK_QUESTIONS: &[&str] = &[
    "Describe your strengths and weaknesses.",
    "What motivated you to apply for this position?",
    "Tell us about a teamwork experience, with a concrete example.",
    "What was the most challenging project you have worked on?",
    "Share an experience where you solved a difficult technical problem.",
    "What are your career plans for the next few years?",
    "How do you approach learning a new technology?",
    "How do you handle stressful situations?",
    "Tell us about a time you showed leadership.",
    "What do you think of our company?",
];

/// The first `min(count, pool size)` canned questions, numbered from 1.
pub fn questions(count: u32) -> Vec<QuestionDraft> {
    FALLBACK_QUESTIONS
        .iter()
        .take(count as usize)
        .zip(1..)
        .map(|(content, sequence)| QuestionDraft {
            content: (*content).to_string(),
            category: FALLBACK_CATEGORY.to_string(),
            question_type: QuestionType::Personality,
            difficulty_level: FALLBACK_DIFFICULTY,
            sequence,
        })
        .collect()
}

pub fn evaluation() -> EvaluationResult {
    EvaluationResult {
        relevance: 7,
        specificity: 6,
        practicality: 7,
        validity: 7,
        total_score: 27,
        feedback: FALLBACK_FEEDBACK.to_string(),
        evaluation_type: EVALUATION_TYPE_FALLBACK.to_string(),
    }
}

pub fn keyword_similarity() -> SimilarityResult {
    similarity(json!({
        "matched_keywords": [],
        "keyword_match_score": 0.0
    }))
}

pub fn semantic_similarity() -> SimilarityResult {
    similarity(json!({ "similarity_score": 0.0 }))
}

pub fn simulation() -> SimulationResult {
    SimulationResult {
        generated_questions: vec![SIMULATION_PLACEHOLDER.to_string()],
        selected_question: SIMULATION_PLACEHOLDER.to_string(),
        user_answer: String::new(),
        evaluation_result: Some(evaluation()),
    }
}

fn similarity(value: Value) -> SimilarityResult {
    match value {
        Value::Object(map) => SimilarityResult(map),
        _ => SimilarityResult(Map::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_questions_capped_by_pool() {
        assert_eq!(questions(3).len(), 3);
        assert_eq!(questions(50).len(), FALLBACK_QUESTIONS.len());
        assert!(questions(0).is_empty());
    }

    #[test]
    fn test_fallback_questions_shape() {
        let drafts = questions(4);
        for (i, d) in drafts.iter().enumerate() {
            assert_eq!(d.sequence, i as u32 + 1);
            assert_eq!(d.question_type, QuestionType::Personality);
            assert_eq!(d.category, "general");
            assert_eq!(d.difficulty_level, 2);
            assert!(!d.content.trim().is_empty());
        }
    }

    #[test]
    fn test_fallback_evaluation_is_mid_range() {
        let e = evaluation();
        assert_eq!(
            (e.relevance, e.specificity, e.practicality, e.validity, e.total_score),
            (7, 6, 7, 7, 27)
        );
        assert_eq!(e.evaluation_type, EVALUATION_TYPE_FALLBACK);
    }

    #[test]
    fn test_fallback_similarity_shapes() {
        let kw = keyword_similarity();
        assert_eq!(kw.0.get("matched_keywords"), Some(&json!([])));
        assert_eq!(kw.0.get("keyword_match_score"), Some(&json!(0.0)));

        let sem = semantic_similarity();
        assert_eq!(sem.0.len(), 1);
        assert_eq!(sem.0.get("similarity_score"), Some(&json!(0.0)));
    }

    #[test]
    fn test_fallback_simulation_carries_fallback_evaluation() {
        let sim = simulation();
        assert_eq!(sim.generated_questions.len(), 1);
        assert_eq!(sim.selected_question, sim.generated_questions[0]);
        assert!(sim.user_answer.is_empty());
        assert_eq!(sim.evaluation_result, Some(evaluation()));
    }
}
