//! Conversational endpoint: every question goes to the language model with
//! a briefing built from live warehouse data.

use axum::Json;
use axum::extract::State;
use wh_nlu::render;
use wh_protocol::{AnswerSource, ChatReply, ChatRequest};

use crate::error::{ApiError, ApiResult};
use crate::inference::Prompt;
use crate::state::AppState;

/// Reject blank input before any work is done.
pub(crate) fn require_text<'a>(text: &'a str, field: &str) -> ApiResult<&'a str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}

/// POST /api/v1/chat: answer a free-form warehouse question.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatReply>> {
    let message = require_text(&req.message, "message")?;

    let analysis = state.processor.analyze(message);
    let snapshot = state.snapshot().await?;
    let briefing = render(state.briefing_style, &analysis, &snapshot);

    let reply = state
        .llm
        .complete(&Prompt::new(briefing, message))
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    tracing::info!(
        intent = %analysis.intent,
        confidence = analysis.confidence,
        tier = state.llm.tier_name(),
        "chat answered"
    );

    Ok(Json(ChatReply::new(reply, AnswerSource::Llm).with_analysis(analysis)))
}
