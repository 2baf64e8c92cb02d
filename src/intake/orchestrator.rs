use super::ModelSettings;
use super::action::{ActionKind, IdeaDraft, ModelAction, TaskDraft};
use super::intent::{is_negative_reply, looks_like_category_question, looks_like_save_request};
use super::normalize::normalize;
use super::prompt::build_system_prompt;
use super::refine::IdeaRefiner;
use super::replies::{
    BACKEND_WRITE_FAILED, CATEGORIES_OFFLINE, GENERIC_ERROR, IDEA_SAVED, MISSING_CATEGORY,
    NO_SUMMARY, PENDING_CANCELLED, TASK_CREATED, UNRESOLVABLE_CATEGORY, UNTITLED,
};
use super::taxonomy::{ResolvedCategory, TaxonomySnapshot};
use crate::backend::{DocumentSink, NewDocument, NewPlanningCard, TaxonomySource};
use crate::memory::{Memory, MemoryDocument, PendingActionStore};
use crate::providers::Provider;
use crate::utils::{clip_chars, first_line, truncate_to_width};
use std::sync::Arc;

const MAX_TITLE_CHARS: usize = 255;
const SUMMARY_WIDTH: usize = 140;

/// Terminal state of one save-idea request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved {
        category: ResolvedCategory,
        title: String,
        content: String,
    },
    /// The draft did not name both an interest and an area.
    MissingCategory,
    /// The named pair does not exist in the taxonomy, in either order.
    Unresolvable,
    /// The backend rejected or never received the document.
    PersistFailed,
}

impl SaveOutcome {
    /// Fold the outcome into the model's conversational reply.
    pub fn render(&self, reply: &str) -> String {
        match self {
            Self::Saved {
                category,
                title,
                content,
            } => {
                let summary = truncate_to_width(first_line(content), SUMMARY_WIDTH);
                let summary = if summary.is_empty() {
                    NO_SUMMARY
                } else {
                    summary.as_str()
                };
                format!(
                    "{reply}\n\n{IDEA_SAVED}\n• Interesse: {}\n• Área: {}\n• Título: {title}\n• Resumo: {summary}",
                    category.interest, category.area
                )
            }
            Self::MissingCategory => MISSING_CATEGORY.to_string(),
            Self::Unresolvable => UNRESOLVABLE_CATEGORY.to_string(),
            Self::PersistFailed => format!("{reply}\n\n{BACKEND_WRITE_FAILED}"),
        }
    }
}

/// Terminal state of one planning-task request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Created,
    PersistFailed,
}

impl TaskOutcome {
    pub fn render(self, reply: &str) -> String {
        match self {
            Self::Created => format!("{reply}\n\n{TASK_CREATED}"),
            Self::PersistFailed => format!("{reply}\n\n{BACKEND_WRITE_FAILED}"),
        }
    }
}

/// Message-level pipeline: intent checks, main model turn, normalization and
/// the save/task workflows. Every failure folds into a textual reply.
pub struct Intake {
    provider: Arc<dyn Provider>,
    taxonomy: Arc<dyn TaxonomySource>,
    sink: Arc<dyn DocumentSink>,
    memory: Arc<dyn Memory>,
    pending: Arc<dyn PendingActionStore>,
    settings: ModelSettings,
}

impl Intake {
    pub fn new(
        provider: Arc<dyn Provider>,
        taxonomy: Arc<dyn TaxonomySource>,
        sink: Arc<dyn DocumentSink>,
        memory: Arc<dyn Memory>,
        pending: Arc<dyn PendingActionStore>,
        settings: ModelSettings,
    ) -> Self {
        Self {
            provider,
            taxonomy,
            sink,
            memory,
            pending,
            settings,
        }
    }

    /// Handle one user message. `None` means nothing should be sent back.
    pub async fn handle_message(&self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if is_negative_reply(text) && self.has_pending_action().await {
            if let Err(e) = self.pending.clear().await {
                tracing::warn!("failed to clear pending action: {e}");
            }
            return Some(PENDING_CANCELLED.to_string());
        }

        if looks_like_category_question(text) {
            return Some(self.list_categories().await);
        }

        Some(self.respond(text).await)
    }

    async fn has_pending_action(&self) -> bool {
        match self.pending.get().await {
            Ok(pending) => pending.is_some(),
            Err(e) => {
                tracing::warn!("failed to read pending action: {e}");
                false
            }
        }
    }

    /// The user's taxonomy as a printable list.
    pub async fn list_categories(&self) -> String {
        match TaxonomySnapshot::fetch(self.taxonomy.as_ref()).await {
            Ok(snapshot) => snapshot.format_category_list(),
            Err(e) => {
                tracing::warn!("failed to load categories: {e}");
                CATEGORIES_OFFLINE.to_string()
            }
        }
    }

    /// Full model round trip for a message that is not a shortcut.
    pub async fn respond(&self, text: &str) -> String {
        let memory = match self.memory.load().await {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(memory = self.memory.name(), "failed to load memory: {e}");
                MemoryDocument::empty()
            }
        };

        let taxonomy = if looks_like_save_request(text) {
            match TaxonomySnapshot::fetch(self.taxonomy.as_ref()).await {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    tracing::warn!("taxonomy unavailable for prompt: {e}");
                    None
                }
            }
        } else {
            None
        };

        let system_prompt = build_system_prompt(&memory, taxonomy.as_ref());
        let raw = match self
            .provider
            .chat_with_system(
                Some(&system_prompt),
                text,
                &self.settings.model,
                self.settings.temperature,
            )
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(provider = self.provider.name(), "model request failed: {e}");
                return GENERIC_ERROR.to_string();
            }
        };

        let action = normalize(&raw);
        tracing::debug!(kind = %action.kind, recovery = ?action.recovery, "model action");
        self.apply(&action, text).await
    }

    async fn apply(&self, action: &ModelAction, text: &str) -> String {
        match action.kind {
            ActionKind::SaveIdea => match action.idea() {
                Some(draft) => self.save_idea(draft, text).await.render(&action.reply),
                None => action.reply.clone(),
            },
            ActionKind::CreateTask => match action.task() {
                Some(draft) => self.create_task(draft).await.render(&action.reply),
                None => action.reply.clone(),
            },
            ActionKind::Reply => action.reply.clone(),
        }
    }

    /// Refine, resolve and persist one idea. `raw_text` is the user's
    /// message, used as the body when the draft carries no summary.
    pub async fn save_idea(&self, draft: &IdeaDraft, raw_text: &str) -> SaveOutcome {
        let interest = draft.interest.trim();
        let area = draft.area.trim();
        if interest.is_empty() || area.is_empty() {
            tracing::info!("save request without interest/area");
            return SaveOutcome::MissingCategory;
        }

        let (title, body) = draft_text(draft, raw_text);
        let (title, content) = match IdeaRefiner::new(self.provider.as_ref(), &self.settings)
            .refine(&title, &body)
            .await
        {
            Some(refinement) => {
                let content = refinement.content();
                (refinement.title, content)
            }
            None => (title, body),
        };

        let category = match TaxonomySnapshot::fetch(self.taxonomy.as_ref()).await {
            Ok(snapshot) => snapshot.resolve(interest, area),
            Err(e) => {
                tracing::warn!("taxonomy unavailable for resolution: {e}");
                None
            }
        };
        let Some(category) = category else {
            tracing::info!(interest, area, "category could not be resolved");
            return SaveOutcome::Unresolvable;
        };

        let document = NewDocument {
            title: title.clone(),
            content: content.clone(),
            interest: category.interest.clone(),
            area: category.area.clone(),
            tags: draft.tags.clone(),
        };
        match self.sink.create_document(document).await {
            Ok(_) => {
                tracing::info!(
                    interest = %category.interest,
                    area = %category.area,
                    "idea saved"
                );
                SaveOutcome::Saved {
                    category,
                    title,
                    content,
                }
            }
            Err(e) => {
                tracing::error!("failed to save idea: {e:#}");
                SaveOutcome::PersistFailed
            }
        }
    }

    pub async fn create_task(&self, draft: &TaskDraft) -> TaskOutcome {
        let card = NewPlanningCard {
            title: draft.title.clone(),
            status: draft.status.clone(),
            priority: draft.priority.clone(),
        };
        match self.sink.create_planning_card(card).await {
            Ok(_) => {
                tracing::info!(title = %draft.title, "planning card created");
                TaskOutcome::Created
            }
            Err(e) => {
                tracing::error!("failed to create planning card: {e:#}");
                TaskOutcome::PersistFailed
            }
        }
    }
}

/// Title and body to refine. Without a summary the whole message becomes
/// the body, and its first line stands in for a missing title.
fn draft_text(draft: &IdeaDraft, raw_text: &str) -> (String, String) {
    let mut title = draft.title.trim().to_string();
    if title.is_empty() {
        title = UNTITLED.to_string();
    }
    let mut body = draft.summary.trim().to_string();
    let raw_text = raw_text.trim();

    if body.is_empty() && !raw_text.is_empty() {
        if title == UNTITLED {
            let line = clip_chars(raw_text.lines().next().unwrap_or_default(), MAX_TITLE_CHARS).trim();
            if !line.is_empty() {
                title = line.to_string();
            }
        }
        body = raw_text.to_string();
    }

    (title, body)
}
