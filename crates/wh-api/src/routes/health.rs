//! Health check endpoint.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /health: liveness check, with the active storage and LLM engine.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let storage = if state.pool.is_some() { "postgres" } else { "memory" };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "storage": storage,
        "llm": state.llm.tier_name(),
    }))
}
