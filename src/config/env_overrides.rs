use super::{Config, TelegramConfig};
use std::path::PathBuf;

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(token) = non_empty_var("TELEGRAM_BOT_TOKEN") {
            match self.telegram.as_mut() {
                Some(telegram) => telegram.bot_token = token,
                None => {
                    self.telegram = Some(TelegramConfig {
                        bot_token: token,
                        allowed_users: vec!["*".into()],
                    });
                }
            }
        }

        if let Some(users) = non_empty_var("TELEGRAM_ALLOWED_USERS")
            && let Some(telegram) = self.telegram.as_mut()
        {
            telegram.allowed_users = users
                .split(',')
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(key) = non_empty_var("OPENROUTER_API_KEY") {
            self.llm.api_key = Some(key);
        }

        if let Some(model) = non_empty_var("OPENROUTER_MODEL") {
            self.llm.model = model;
        }

        if let Some(url) = non_empty_var("OPENROUTER_BASE_URL") {
            self.llm.base_url = url;
        }

        if let Some(timeout) = non_empty_var("OPENROUTER_TIMEOUT")
            && let Ok(secs) = timeout.parse::<u64>()
        {
            self.llm.timeout_secs = secs;
            self.backend.timeout_secs = secs;
        }

        if let Some(url) = non_empty_var("OBSIDIAN_API_BASE_URL") {
            self.backend.base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(path) = non_empty_var("MEMORIA_PATH") {
            self.memory.path = Some(PathBuf::from(path));
        }

        if let Some(level) = non_empty_var("SECRETARY_LOG_LEVEL") {
            self.log_level = level;
        }
    }
}
