//! API server configuration, loadable from TOML and overridden by environment.

use serde::Deserialize;
use wh_nlu::BriefingStyle;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "WH_CONFIG";

/// Top-level API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// PostgreSQL connection URL. None runs on in-memory sample data.
    #[serde(default)]
    pub database_url: Option<String>,
    /// Briefing handed to the language model.
    #[serde(default)]
    pub briefing_style: BriefingStyle,
    /// Chat-completions endpoint settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

/// OpenAI-compatible chat-completions settings (Groq by default).
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// API base URL; `/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Bearer token. None selects the offline engine.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama3-8b-8192".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
            briefing_style: BriefingStyle::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Defaults, then the file named by `WH_CONFIG` (if set), then
    /// environment overrides.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => {
                tracing::info!(path = %path, "loading config file");
                Self::from_file(&path)?
            }
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment-style overrides from `lookup`. Unparseable
    /// values are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!(value = %port, "ignoring invalid PORT"),
            }
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            self.database_url = Some(url);
        }
        if let Some(style) = lookup("BRIEFING_STYLE") {
            match style.parse() {
                Ok(style) => self.briefing_style = style,
                Err(e) => tracing::warn!(error = %e, "ignoring invalid BRIEFING_STYLE"),
            }
        }
        if let Some(key) = lookup("GROQ_API_KEY").filter(|v| !v.is_empty()) {
            self.llm.api_key = Some(key);
        }
        if let Some(base_url) = lookup("LLM_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Some(model) = lookup("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(secs) = lookup("LLM_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.llm.timeout_secs = secs,
                Err(_) => tracing::warn!(value = %secs, "ignoring invalid LLM_TIMEOUT_SECS"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert!(config.database_url.is_none());
        assert_eq!(config.briefing_style, BriefingStyle::Compact);
        assert_eq!(config.llm.model, "llama3-8b-8192");
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.llm.max_tokens, 1000);
    }

    #[test]
    fn deserialize_minimal_toml() {
        let config: ApiConfig = toml::from_str("port = 9000").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.llm.base_url, "https://api.groq.com/openai/v1");
    }

    #[test]
    fn deserialize_full_toml() {
        let toml = r#"
host = "127.0.0.1"
port = 8080
database_url = "postgres://wh:wh@localhost/warehouse"
briefing_style = "detailed"

[llm]
base_url = "http://localhost:11434/v1"
model = "llama3"
api_key = "sk-test"
temperature = 0.5
max_tokens = 800
timeout_secs = 10
"#;
        let config: ApiConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.briefing_style, BriefingStyle::Detailed);
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm.max_tokens, 800);
        assert!((config.llm.temperature - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn unknown_briefing_style_rejected() {
        assert!(toml::from_str::<ApiConfig>(r#"briefing_style = "verbose""#).is_err());
    }

    #[test]
    fn overrides_apply() {
        let mut config = ApiConfig::default();
        config.apply_overrides(env(&[
            ("PORT", "9100"),
            ("DATABASE_URL", "postgres://localhost/wh"),
            ("BRIEFING_STYLE", "detailed"),
            ("GROQ_API_KEY", "gsk-123"),
            ("LLM_MODEL", "mixtral-8x7b"),
            ("LLM_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.port, 9100);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/wh"));
        assert_eq!(config.briefing_style, BriefingStyle::Detailed);
        assert_eq!(config.llm.api_key.as_deref(), Some("gsk-123"));
        assert_eq!(config.llm.model, "mixtral-8x7b");
        assert_eq!(config.llm.timeout_secs, 5);
    }

    #[test]
    fn invalid_overrides_ignored() {
        let mut config = ApiConfig::default();
        config.apply_overrides(env(&[
            ("PORT", "not-a-port"),
            ("BRIEFING_STYLE", "loud"),
            ("GROQ_API_KEY", ""),
        ]));
        assert_eq!(config.port, 8000);
        assert_eq!(config.briefing_style, BriefingStyle::Compact);
        assert!(config.llm.api_key.is_none());
    }
}
