//! OpenAI-compatible chat-completions engine.
//!
//! Posts the briefing as the system message and the user's question as the
//! user message to `{base_url}/chat/completions` with bearer auth, and
//! returns `choices[0].message.content`. Works with Groq, OpenAI, and local
//! servers that speak the same protocol.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use super::{CompletionEngine, Prompt, Sampling};
use crate::config::LlmConfig;

/// Request body.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response body (only fields we need).
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client.
pub struct ChatCompletionsEngine {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    sampling: Sampling,
    timeout: Duration,
}

impl ChatCompletionsEngine {
    pub fn new(config: &LlmConfig, api_key: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: api_key.into(),
            sampling: Sampling {
                temperature: config.temperature,
                max_tokens: config.max_tokens,
            },
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    async fn call(&self, prompt: &Prompt) -> anyhow::Result<String> {
        let sampling = prompt.sampling.unwrap_or(self.sampling);
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
            stream: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("chat completions request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("chat completions returned {status}: {}", truncate(&detail, 200));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("failed to parse chat completions response")?;
        extract_reply(parsed)
    }
}

#[async_trait]
impl CompletionEngine for ChatCompletionsEngine {
    async fn complete(&self, prompt: &Prompt) -> anyhow::Result<String> {
        match timeout(self.timeout, self.call(prompt)).await {
            Ok(Ok(reply)) => {
                tracing::debug!(model = %self.model, reply_len = reply.len(), "completion received");
                Ok(reply)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "chat completion failed");
                Err(e)
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "chat completion timed out"
                );
                anyhow::bail!("completion timed out after {}s", self.timeout.as_secs())
            }
        }
    }

    fn tier_name(&self) -> &str {
        "chat_completions"
    }
}

/// First choice's message content.
fn extract_reply(response: ChatResponse) -> anyhow::Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .context("chat completions response had no message content")
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "model": "llama3-8b-8192",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    fn engine_for(server: &MockServer, timeout_secs: u64) -> ChatCompletionsEngine {
        let config = LlmConfig {
            base_url: server.uri(),
            timeout_secs,
            ..LlmConfig::default()
        };
        ChatCompletionsEngine::new(&config, "test-key").unwrap()
    }

    // ── Engine ───────────────────────────────────────────────────

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3-8b-8192",
                "max_tokens": 1000,
                "messages": [
                    { "role": "system", "content": "briefing" },
                    { "role": "user", "content": "how many products?" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("There are 50.")))
            .mount(&server)
            .await;

        let reply = engine_for(&server, 5)
            .complete(&Prompt::new("briefing", "how many products?"))
            .await
            .unwrap();
        assert_eq!(reply, "There are 50.");
    }

    #[tokio::test]
    async fn sampling_override_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({ "max_tokens": 800 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
            .mount(&server)
            .await;

        let prompt = Prompt::new("briefing", "q").with_sampling(Sampling {
            temperature: 0.5,
            max_tokens: 800,
        });
        let reply = engine_for(&server, 5).complete(&prompt).await.unwrap();
        assert_eq!(reply, "ok");
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = engine_for(&server, 5)
            .complete(&Prompt::new("briefing", "q"))
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("401"), "{message}");
        assert!(message.contains("invalid api key"), "{message}");
    }

    #[tokio::test]
    async fn empty_choices_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let result = engine_for(&server, 5)
            .complete(&Prompt::new("briefing", "q"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn slow_endpoint_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("late"))
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        let err = engine_for(&server, 1)
            .complete(&Prompt::new("briefing", "q"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn garbage_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        assert!(
            engine_for(&server, 5)
                .complete(&Prompt::new("briefing", "q"))
                .await
                .is_err()
        );
    }

    // ── Helpers ──────────────────────────────────────────────────

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let config = LlmConfig {
            base_url: "http://localhost:8080/v1/".into(),
            ..LlmConfig::default()
        };
        let engine = ChatCompletionsEngine::new(&config, "k").unwrap();
        assert_eq!(engine.endpoint, "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn null_content_is_error() {
        let parsed: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        }))
        .unwrap();
        assert!(extract_reply(parsed).is_err());
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
