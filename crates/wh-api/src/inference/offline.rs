//! Offline engine used when no language model is configured.

use async_trait::async_trait;

use super::{CompletionEngine, Prompt};

/// Reply returned for every prompt.
pub const OFFLINE_NOTICE: &str = "The language model is not configured, so I can't answer \
free-form questions right now. Warehouse statistics and low-stock questions sent to \
/api/v1/warehouse/query are still answered from live data. Set GROQ_API_KEY to enable \
full answers.";

/// Engine that never leaves the process.
#[derive(Debug, Default)]
pub struct OfflineEngine;

#[async_trait]
impl CompletionEngine for OfflineEngine {
    async fn complete(&self, prompt: &Prompt) -> anyhow::Result<String> {
        tracing::debug!(
            briefing_len = prompt.system.len(),
            "offline engine answering without a model"
        );
        Ok(OFFLINE_NOTICE.to_string())
    }

    fn tier_name(&self) -> &str {
        "offline"
    }
}
