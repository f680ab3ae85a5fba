//! Analysis endpoint: shows what the assistant understood and the briefing
//! it would hand the model, without calling the model.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use wh_nlu::render;
use wh_protocol::AnalyzeReply;

use super::chat::require_text;
use crate::error::ApiResult;
use crate::state::AppState;

/// Request body for query analysis.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub query: String,
}

/// POST /api/v1/analyze: intent, entities, confidence and briefing.
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeReply>> {
    let query = require_text(&req.query, "query")?;
    let analysis = state.processor.analyze(query);
    let snapshot = state.snapshot().await?;
    let context = render(state.briefing_style, &analysis, &snapshot);
    Ok(Json(AnalyzeReply { analysis, context }))
}
