use axum::Json;
use serde_json::{json, Value};

use crate::llm_client::MODEL;

/// GET /health
/// Liveness only. Does not contact the model provider.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "talentlens-api",
        "version": env!("CARGO_PKG_VERSION"),
        "model": MODEL
    }))
}
