//! Shared test harness for E2E integration tests.
//!
//! Wires the API router to a mock chat-completions server so requests
//! exercise real code paths from HTTP through query analysis, briefing
//! synthesis and the LLM client.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wh_api::config::LlmConfig;
use wh_api::inference::ChatCompletionsEngine;
use wh_api::routes::build_router;
use wh_api::state::AppState;
use wh_nlu::BriefingStyle;

/// End-to-end test harness: API router + mock LLM endpoint.
pub struct TestHarness {
    /// API application state (in-memory sample warehouse, no DB).
    pub state: AppState,
    /// Axum router for HTTP requests via `tower::oneshot`.
    pub router: Router,
    /// Mock chat-completions server.
    pub llm: MockServer,
}

impl TestHarness {
    /// Sample warehouse, compact briefings, 2s LLM timeout.
    pub async fn with_sample_data() -> Self {
        Self::build(BriefingStyle::Compact).await
    }

    /// Sample warehouse with detailed briefings.
    pub async fn detailed() -> Self {
        Self::build(BriefingStyle::Detailed).await
    }

    async fn build(style: BriefingStyle) -> Self {
        let llm = MockServer::start().await;
        let config = LlmConfig {
            base_url: llm.uri(),
            timeout_secs: 2,
            ..LlmConfig::default()
        };
        let engine = ChatCompletionsEngine::new(&config, "e2e-key").unwrap();
        let state = AppState::with_sample_data()
            .with_engine(Arc::new(engine))
            .with_briefing_style(style);
        let router = build_router(state.clone());

        Self { state, router, llm }
    }

    /// Answer every completion request with `content`.
    pub async fn llm_replies(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
            .mount(&self.llm)
            .await;
    }

    /// Fail every completion request with `status`.
    pub async fn llm_fails(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream exploded"))
            .mount(&self.llm)
            .await;
    }

    /// Fail the test if any completion request arrives.
    pub async fn llm_never_called(&self) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.llm)
            .await;
    }

    /// JSON bodies of every completion request the mock received.
    pub async fn llm_requests(&self) -> Vec<serde_json::Value> {
        self.llm
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }

    /// POST /api/v1/chat.
    pub async fn chat(&self, message: &str) -> (StatusCode, serde_json::Value) {
        self.post("/api/v1/chat", serde_json::json!({ "message": message }))
            .await
    }

    /// POST /api/v1/warehouse/query.
    pub async fn query(&self, query: &str, include_context: bool) -> (StatusCode, serde_json::Value) {
        self.post(
            "/api/v1/warehouse/query",
            serde_json::json!({ "query": query, "include_context": include_context }),
        )
        .await
    }

    /// POST /api/v1/analyze.
    pub async fn analyze(&self, query: &str) -> (StatusCode, serde_json::Value) {
        self.post("/api/v1/analyze", serde_json::json!({ "query": query }))
            .await
    }

    pub async fn post(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }
}

/// Minimal chat-completions response body.
pub fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-e2e",
        "object": "chat.completion",
        "model": "llama3-8b-8192",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// The system message of a recorded completion request.
pub fn system_message(request: &serde_json::Value) -> &str {
    request["messages"][0]["content"].as_str().unwrap()
}

/// The user message of a recorded completion request.
pub fn user_message(request: &serde_json::Value) -> &str {
    request["messages"][1]["content"].as_str().unwrap()
}
