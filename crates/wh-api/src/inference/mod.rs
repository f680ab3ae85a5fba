//! Language-model completion for warehouse questions.
//!
//! Every question is first analyzed locally (`wh_nlu::QueryProcessor`).
//! Statistics and low-stock questions on the query endpoint are answered
//! directly from warehouse data (`direct`); everything else is sent to a
//! `CompletionEngine` together with the synthesized briefing.
//!
//! Engines:
//! - **Chat completions**: any OpenAI-compatible endpoint, Groq by default.
//! - **Offline**: fixed notice when no API key is configured.

pub mod chat_completions;
pub mod direct;
pub mod offline;

use async_trait::async_trait;

pub use chat_completions::ChatCompletionsEngine;
pub use offline::OfflineEngine;

/// Sampling overrides for one completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A system briefing plus the user's own words.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    /// None uses the engine's configured sampling.
    pub sampling: Option<Sampling>,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            sampling: None,
        }
    }

    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = Some(sampling);
        self
    }
}

/// Trait for engines that turn a prompt into a reply.
#[async_trait]
pub trait CompletionEngine: Send + Sync {
    /// Generate the assistant's reply.
    async fn complete(&self, prompt: &Prompt) -> anyhow::Result<String>;

    /// Name of this engine (for logging).
    fn tier_name(&self) -> &str;
}
