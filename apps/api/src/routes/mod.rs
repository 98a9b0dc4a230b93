pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::interview::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Admin health checks
        .route(
            "/api/admin/health/status",
            get(health::system_status_handler),
        )
        .route(
            "/api/admin/health/llm/test",
            post(health::llm_test_handler),
        )
        .route(
            "/api/admin/health/fastapi/ping",
            get(health::fastapi_ping_handler),
        )
        // Interview AI API
        .route(
            "/api/v1/interviews/questions/generate",
            post(handlers::handle_generate_questions),
        )
        .route(
            "/api/v1/interviews/answers/evaluate",
            post(handlers::handle_evaluate_answer),
        )
        .route(
            "/api/v1/interviews/similarity/keyword",
            post(handlers::handle_keyword_similarity),
        )
        .route(
            "/api/v1/interviews/similarity/semantic",
            post(handlers::handle_semantic_similarity),
        )
        .route(
            "/api/v1/interviews/simulate",
            post(handlers::handle_simulate_interview),
        )
        .fallback(not_found)
        .with_state(state)
}
