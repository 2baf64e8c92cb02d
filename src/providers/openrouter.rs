use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::providers::{build_http_client, traits::Provider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const PROVIDER_NAME: &str = "OpenRouter";

/// OpenAI-compatible chat completions client (OpenRouter by default).
pub struct OpenRouterProvider {
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    chat_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenRouterProvider {
    pub fn new(api_key: Option<&str>, chat_url: &str, timeout_secs: u64) -> Self {
        Self {
            cached_auth_header: api_key
                .filter(|k| !k.trim().is_empty())
                .map(|k| format!("Bearer {}", k.trim())),
            chat_url: chat_url.to_string(),
            client: build_http_client(timeout_secs),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(
            config.api_key.as_deref(),
            &config.base_url,
            config.timeout_secs,
        )
    }

    fn build_request<'a>(
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(sys) = system_prompt {
            messages.push(Message {
                role: "system",
                content: sys,
            });
        }
        messages.push(Message {
            role: "user",
            content: message,
        });

        ChatRequest {
            model,
            messages,
            temperature,
        }
    }

    fn extract_text(chat_response: ChatResponse) -> String {
        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default()
    }
}

#[async_trait]
impl Provider for OpenRouterProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn chat_with_system(
        &self,
        system_prompt: Option<&str>,
        message: &str,
        model: &str,
        temperature: f64,
    ) -> anyhow::Result<String> {
        let auth_header =
            self.cached_auth_header
                .as_ref()
                .ok_or_else(|| LlmError::MissingApiKey {
                    provider: PROVIDER_NAME.to_string(),
                })?;

        let request = Self::build_request(system_prompt, message, model, temperature);
        let response = self
            .client
            .post(&self.chat_url)
            .header("Authorization", auth_header)
            .header("X-Title", "Secretary")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(super::api_error(PROVIDER_NAME, response).await);
        }

        let chat_response: ChatResponse = response.json().await?;
        if chat_response.choices.is_empty() {
            tracing::warn!("OpenRouter returned no choices");
        }
        Ok(Self::extract_text(chat_response))
    }
}
