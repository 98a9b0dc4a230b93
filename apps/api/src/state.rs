use std::sync::Arc;

use crate::ml_client::InterviewAi;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Gateway to the AI service. `MlClient` in production, fakes in tests.
    pub ml: Arc<dyn InterviewAi>,
}
