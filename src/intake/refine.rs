use super::ModelSettings;
use super::normalize::extract_json;
use super::prompt::REFINE_SYSTEM_PROMPT;
use super::replies::UNTITLED;
use crate::providers::Provider;
use crate::utils::clip_chars;
use serde_json::Value;

const MAX_TITLE_CHARS: usize = 255;

/// Corrected title/body plus a short description of the idea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refinement {
    pub title: String,
    pub description: String,
    pub body: String,
}

impl Refinement {
    /// Content persisted for a refined idea: description, blank line, body.
    pub fn content(&self) -> String {
        format!("{}\n\n{}", self.description, self.body)
            .trim()
            .to_string()
    }
}

/// Second model pass that fixes spelling and punctuation before saving.
pub struct IdeaRefiner<'a> {
    provider: &'a dyn Provider,
    settings: &'a ModelSettings,
}

impl<'a> IdeaRefiner<'a> {
    pub fn new(provider: &'a dyn Provider, settings: &'a ModelSettings) -> Self {
        Self { provider, settings }
    }

    /// `None` means "persist the original text": nothing to refine, the
    /// model call failed, its output was not an object, or it came back
    /// without a description.
    pub async fn refine(&self, title: &str, body: &str) -> Option<Refinement> {
        let title = title.trim();
        let body = body.trim();
        if title.is_empty() && body.is_empty() {
            return None;
        }

        let message = format!("TÍTULO ORIGINAL:\n{title}\n\nTEXTO ORIGINAL:\n{body}");
        let raw = match self
            .provider
            .chat_with_system(
                Some(REFINE_SYSTEM_PROMPT),
                &message,
                &self.settings.model,
                self.settings.temperature,
            )
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("idea refinement request failed: {e}");
                return None;
            }
        };

        let Some((Value::Object(parsed), _)) = extract_json(&raw) else {
            tracing::warn!("idea refinement returned no JSON object");
            return None;
        };

        let text = |key: &str| -> String {
            match parsed.get(key) {
                Some(Value::String(s)) => s.trim().to_string(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            }
        };

        let description = text("descricao");
        if description.is_empty() {
            tracing::debug!("idea refinement came back without a description");
            return None;
        }

        let refined_title = Some(text("titulo"))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| title.to_string());
        let refined_title = clip_chars(&refined_title, MAX_TITLE_CHARS).trim();
        let refined_title = if refined_title.is_empty() {
            UNTITLED
        } else {
            refined_title
        };

        let refined_body = Some(text("corpo"))
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| body.to_string());

        Some(Refinement {
            title: refined_title.to_string(),
            description,
            body: refined_body,
        })
    }
}
