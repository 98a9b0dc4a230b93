use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::state::AppState;

const TEST_RESUME: &str =
    "Backend developer with Java, Spring Boot and RESTful API experience.";
const TEST_POSITION: &str = "Backend Developer";
const TEST_QUESTION_COUNT: u32 = 3;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "interv-api"
    }))
}

#[derive(Debug, Serialize)]
pub struct ServiceStatuses {
    pub interview_service: &'static str,
    pub llm_service: &'static str,
    pub fastapi_connection: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub timestamp: DateTime<Utc>,
    pub status: &'static str,
    pub services: ServiceStatuses,
}

#[derive(Debug, Serialize)]
pub struct PingResult {
    pub fastapi_reachable: bool,
    pub timestamp: DateTime<Utc>,
    pub message: &'static str,
}

/// GET /api/admin/health/status
/// Overall status; DOWN whenever the AI service fails its health check.
pub async fn system_status_handler(State(state): State<AppState>) -> Json<SystemStatus> {
    let healthy = state.ml.is_server_healthy().await;
    Json(SystemStatus {
        timestamp: Utc::now(),
        status: if healthy { "UP" } else { "DOWN" },
        services: ServiceStatuses {
            interview_service: "UP",
            llm_service: if healthy { "UP" } else { "DOWN" },
            fastapi_connection: if healthy { "CONNECTED" } else { "DISCONNECTED" },
        },
    })
}

/// GET /api/admin/health/fastapi/ping
pub async fn fastapi_ping_handler(State(state): State<AppState>) -> Json<PingResult> {
    let reachable = state.ml.is_server_healthy().await;
    Json(PingResult {
        fastapi_reachable: reachable,
        timestamp: Utc::now(),
        message: if reachable {
            "AI service connection OK"
        } else {
            "AI service connection failed"
        },
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct LlmTestRequest {
    pub resume: Option<String>,
    pub position: Option<String>,
}

/// POST /api/admin/health/llm/test
/// Generates a small batch of questions end to end and reports the timing.
/// The body is optional; missing fields use a built-in sample.
pub async fn llm_test_handler(
    State(state): State<AppState>,
    body: Option<Json<LlmTestRequest>>,
) -> (StatusCode, Json<Value>) {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let resume = request.resume.unwrap_or_else(|| TEST_RESUME.to_string());
    let position = request.position.unwrap_or_else(|| TEST_POSITION.to_string());

    let started = Instant::now();
    let outcome = state
        .ml
        .generate_questions(&resume, &position, TEST_QUESTION_COUNT)
        .await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match outcome {
        Ok(questions) => {
            tracing::info!(
                "AI connection test passed in {elapsed_ms}ms ({} questions)",
                questions.len()
            );
            let body = json!({
                "success": true,
                "response_time_ms": elapsed_ms,
                "questions_generated": questions.len(),
                "sample_question": questions.first().map(|q| q.content.as_str()),
                "test_data": {
                    "resume_length": resume.chars().count(),
                    "position": position
                }
            });
            (StatusCode::OK, Json(body))
        }
        Err(e) => {
            tracing::error!("AI connection test failed: {e}");
            let body = json!({
                "success": false,
                "error": e.to_string(),
                "error_type": e.code()
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    use serde_json::{json, Value};

    use crate::routes::build_router;
    use crate::test_support::{body_json, fake_state, FakeAi};

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_liveness() {
        let app = build_router(fake_state(FakeAi::default()));
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_system_status_reflects_ai_health() {
        let app = build_router(fake_state(FakeAi::default()));
        let body = body_json(app.oneshot(get("/api/admin/health/status")).await.unwrap()).await;
        assert_eq!(body["status"], "UP");
        assert_eq!(body["services"]["fastapi_connection"], "CONNECTED");

        let app = build_router(fake_state(FakeAi {
            unhealthy: true,
            ..FakeAi::default()
        }));
        let response = app.oneshot(get("/api/admin/health/status")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "DOWN");
        assert_eq!(body["services"]["llm_service"], "DOWN");
        assert_eq!(body["services"]["interview_service"], "UP");
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_llm_test_uses_defaults_without_body() {
        let app = build_router(fake_state(FakeAi::default()));
        let request = Request::builder()
            .method("POST")
            .uri("/api/admin/health/llm/test")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["questions_generated"], 3);
        assert!(body["sample_question"].is_string());
        assert!(body["response_time_ms"].is_u64());
        assert_eq!(body["test_data"]["position"], "Backend Developer");
    }

    #[tokio::test]
    async fn test_llm_test_echoes_supplied_data() {
        let app = build_router(fake_state(FakeAi::default()));
        let response = app
            .oneshot(post_json(
                "/api/admin/health/llm/test",
                json!({"resume": "Rust, Tokio", "position": "Platform Engineer"}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["test_data"]["resume_length"], 11);
        assert_eq!(body["test_data"]["position"], "Platform Engineer");
    }

    #[tokio::test]
    async fn test_llm_test_failure_is_500() {
        let app = build_router(fake_state(FakeAi {
            fail_generation: true,
            ..FakeAi::default()
        }));
        let response = app
            .oneshot(post_json("/api/admin/health/llm/test", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error_type"], "QUESTION_GENERATION_FAILED");
        assert!(body["error"].as_str().unwrap().contains("no usable questions"));
    }

    #[tokio::test]
    async fn test_fastapi_ping_unreachable() {
        let app = build_router(fake_state(FakeAi {
            unhealthy: true,
            ..FakeAi::default()
        }));
        let body = body_json(
            app.oneshot(get("/api/admin/health/fastapi/ping"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(body["fastapi_reachable"], false);
        assert!(body["timestamp"].is_string());
    }
}
