pub mod handler;


use crate::channels::traits::ChannelMessage;
use crate::config::TelegramConfig;
use serde_json::Value;
use uuid::Uuid;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Telegram channel: long-polls the Bot API for updates.
pub struct TelegramChannel {
    bot_token: String,
    allowed_users: Vec<String>,
    api_base: String,
    client: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(bot_token: String, allowed_users: Vec<String>) -> Self {
        Self {
            bot_token,
            allowed_users,
            api_base: DEFAULT_API_BASE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &TelegramConfig) -> Self {
        Self::new(config.bot_token.clone(), config.allowed_users.clone())
    }

    /// Point the channel at another Bot API host (local bot server, tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base, self.bot_token)
    }

    /// Exact, case-sensitive match on username or numeric id; `*` allows all.
    fn is_user_allowed(&self, identity: &str) -> bool {
        !identity.is_empty()
            && self
                .allowed_users
                .iter()
                .any(|allowed| allowed == "*" || allowed == identity)
    }

    fn is_any_user_allowed<'a, I>(&self, identities: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        identities.into_iter().any(|id| self.is_user_allowed(id))
    }

    /// Turn one `getUpdates` entry into a [`ChannelMessage`]. Returns `None`
    /// for updates without a text or voice message and for senders outside
    /// the allowlist.
    fn parse_update(&self, update: &Value) -> Option<ChannelMessage> {
        let message = update.get("message")?;

        let text = message.get("text").and_then(Value::as_str);
        let is_voice = message.get("voice").is_some();
        if text.is_none() && !is_voice {
            return None;
        }

        let from = message.get("from");
        let username = from
            .and_then(|f| f.get("username"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let user_id = from
            .and_then(|f| f.get("id"))
            .and_then(Value::as_i64)
            .map(|id| id.to_string());

        let identities = [username.as_deref(), user_id.as_deref()];
        if !self.is_any_user_allowed(identities.into_iter().flatten()) {
            tracing::warn!(
                username = username.as_deref().unwrap_or("unknown"),
                user_id = user_id.as_deref().unwrap_or("unknown"),
                "Telegram: ignoring message from unauthorized user; add the @username or numeric id to telegram.allowed_users"
            );
            return None;
        }

        let chat_id = message
            .get("chat")
            .and_then(|c| c.get("id"))
            .and_then(Value::as_i64)
            .map(|id| id.to_string())
            .unwrap_or_default();

        Some(ChannelMessage {
            id: Uuid::new_v4().to_string(),
            sender: chat_id,
            username,
            content: text.unwrap_or_default().to_string(),
            channel: "telegram".to_string(),
            is_voice,
            timestamp: message.get("date").and_then(Value::as_u64).unwrap_or_else(|| {
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_secs()
            }),
        })
    }
}
