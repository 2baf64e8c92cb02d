use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::Level;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub telegram: Option<TelegramConfig>,

    #[serde(default)]
    pub memory: MemoryConfig,

    /// "error" | "warn" | "info" | "debug" | "trace"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            llm: LlmConfig::default(),
            backend: BackendConfig::default(),
            telegram: None,
            memory: MemoryConfig::default(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    /// Full chat-completions endpoint (OpenAI-compatible)
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_model() -> String {
    "meta-llama/llama-3-8b-instruct".into()
}

fn default_llm_base_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".into()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_llm_base_url(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the notes backend, e.g. `http://localhost:3001`
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Telegram usernames or numeric ids; `*` allows everyone.
    #[serde(default)]
    pub allowed_users: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Location of the JSON memory file. Defaults to `memoria.json` next to
    /// config.toml.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn memory_path(&self) -> PathBuf {
        if let Some(path) = &self.memory.path {
            return path.clone();
        }
        self.config_path
            .parent()
            .map_or_else(|| PathBuf::from("memoria.json"), |dir| dir.join("memoria.json"))
    }

    pub fn tracing_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }

    /// Names of required settings that are still empty.
    pub fn missing_settings(&self, needs_telegram: bool) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if needs_telegram
            && self
                .telegram
                .as_ref()
                .is_none_or(|t| t.bot_token.trim().is_empty())
        {
            missing.push("TELEGRAM_BOT_TOKEN");
        }
        if self
            .llm
            .api_key
            .as_deref()
            .is_none_or(|k| k.trim().is_empty())
        {
            missing.push("OPENROUTER_API_KEY");
        }
        if self.backend.base_url.trim().is_empty() {
            missing.push("OBSIDIAN_API_BASE_URL");
        }
        missing
    }

    pub fn validate(&self, needs_telegram: bool) -> Result<(), ConfigError> {
        let missing = self.missing_settings(needs_telegram);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Missing(missing))
        }
    }
}
