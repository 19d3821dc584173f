use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmGateway;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; nothing in here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Gemini in production, a stub in tests.
    pub gateway: Arc<dyn LlmGateway>,
    pub config: Config,
}
