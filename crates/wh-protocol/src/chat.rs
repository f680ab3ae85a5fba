use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::QueryAnalysis;

/// Body of `POST /api/v1/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Natural-language question about warehouse operations.
    pub message: String,
}

/// Body of `POST /api/v1/warehouse/query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseQuery {
    pub query: String,
    /// Echo the query analysis back in the reply.
    #[serde(default = "default_include_context")]
    pub include_context: bool,
}

fn default_include_context() -> bool {
    true
}

/// Which path produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    /// Composed directly from warehouse data.
    Direct,
    /// Generated by the language model.
    Llm,
}

/// Reply returned by the chat and query endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_analysis: Option<QueryAnalysis>,
    pub source: AnswerSource,
    pub timestamp: DateTime<Utc>,
}

impl ChatReply {
    pub fn new(reply: impl Into<String>, source: AnswerSource) -> Self {
        Self {
            reply: reply.into(),
            query_analysis: None,
            source,
            timestamp: Utc::now(),
        }
    }

    pub fn with_analysis(mut self, analysis: QueryAnalysis) -> Self {
        self.query_analysis = Some(analysis);
        self
    }
}

/// Output of `POST /api/v1/analyze`: the analysis plus the briefing the
/// model would receive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeReply {
    pub analysis: QueryAnalysis,
    pub context: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Entities, Intent};

    #[test]
    fn warehouse_query_defaults_include_context() {
        let q: WarehouseQuery = serde_json::from_str(r#"{"query": "stats"}"#).unwrap();
        assert!(q.include_context);
    }

    #[test]
    fn reply_without_analysis_omits_field() {
        let reply = ChatReply::new("hello", AnswerSource::Llm);
        let json = serde_json::to_value(&reply).unwrap();
        assert!(json.get("query_analysis").is_none());
        assert_eq!(json["source"], "llm");
    }

    #[test]
    fn reply_with_analysis_includes_intent() {
        let analysis = QueryAnalysis {
            intent: Intent::WarehouseStats,
            entities: Entities::default(),
            original_query: "stats".into(),
            confidence: 0.9,
        };
        let reply = ChatReply::new("overview", AnswerSource::Direct).with_analysis(analysis);
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["query_analysis"]["intent"], "warehouse_stats");
        assert_eq!(json["source"], "direct");
    }
}
