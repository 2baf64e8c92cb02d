use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `Secretary`.
///
/// Each collaborator defines its own error variant. Collaborator traits return
/// `anyhow::Result` so the intake pipeline can treat every failure as a
/// transport failure; library callers can still downcast to these types when
/// they need to decide a recovery strategy.
#[derive(Debug, Error)]
pub enum SecretaryError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM / Provider ──────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Backend (taxonomy + persistence) ────────────────────────────────
    #[error("backend: {0}")]
    Backend(#[from] BackendError),

    // ── Memory ──────────────────────────────────────────────────────────
    #[error("memory: {0}")]
    Memory(#[from] MemoryError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("missing required settings: {}. Set them in config.toml or export them in the environment", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── LLM / Provider errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} API key not set (export OPENROUTER_API_KEY)")]
    MissingApiKey { provider: String },

    #[error("{provider} API error ({status}): {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },
}

// ─── Backend errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{method} {path} failed with status {status}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
    },

    #[error("invalid response from {path}: {message}")]
    Decode { path: String, message: String },
}

// ─── Memory errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("memory file io ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("memory serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience alias used by the config layer and the binary.
pub type Result<T, E = SecretaryError> = std::result::Result<T, E>;
