//! Structured query endpoint: statistics and low-stock questions are
//! answered from data, everything else by the language model.

use axum::Json;
use axum::extract::State;
use wh_nlu::render;
use wh_protocol::{AnswerSource, ChatReply, Intent, WarehouseQuery};

use super::chat::require_text;
use crate::error::{ApiError, ApiResult};
use crate::inference::{Prompt, Sampling, direct};
use crate::state::AppState;

/// More focused than conversational chat.
const QUERY_SAMPLING: Sampling = Sampling {
    temperature: 0.5,
    max_tokens: 800,
};

/// POST /api/v1/warehouse/query: answer a warehouse query.
pub async fn warehouse_query(
    State(state): State<AppState>,
    Json(req): Json<WarehouseQuery>,
) -> ApiResult<Json<ChatReply>> {
    let query = require_text(&req.query, "query")?;
    let analysis = state.processor.analyze(query);

    let (reply, source) = match analysis.intent {
        Intent::WarehouseStats => (direct::stats_answer(&state.stats().await?), AnswerSource::Direct),
        Intent::LowStock => (
            direct::low_stock_answer(&state.low_stock().await?),
            AnswerSource::Direct,
        ),
        _ => {
            let snapshot = state.snapshot().await?;
            let briefing = render(state.briefing_style, &analysis, &snapshot);
            let reply = state
                .llm
                .complete(&Prompt::new(briefing, query).with_sampling(QUERY_SAMPLING))
                .await
                .map_err(|e| ApiError::Upstream(e.to_string()))?;
            (reply, AnswerSource::Llm)
        }
    };

    tracing::info!(
        intent = %analysis.intent,
        confidence = analysis.confidence,
        source = ?source,
        "warehouse query answered"
    );

    let mut response = ChatReply::new(reply, source);
    if req.include_context {
        response = response.with_analysis(analysis);
    }
    Ok(Json(response))
}
