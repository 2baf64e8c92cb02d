use serde_json::{Map, Value};
use strum::{Display, EnumString, IntoStaticStr};

/// Closed set of actions the model may request. The wire tokens are the
/// Portuguese strings the system prompt teaches the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
pub enum ActionKind {
    #[strum(serialize = "responder")]
    Reply,
    #[strum(serialize = "salvar_ideia")]
    SaveIdea,
    #[strum(serialize = "criar_tarefa_planejamento")]
    CreateTask,
}

/// How the model output was recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// A JSON value parsed as-is.
    Clean,
    /// Parsed only after inserting missing commas between members.
    Repaired,
    /// No JSON could be recovered; the raw text became the reply.
    RawText,
}

/// Unresolved save request extracted from a `salvar_ideia` turn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdeaDraft {
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub interest: String,
    pub area: String,
}

/// Planning card request extracted from a `criar_tarefa_planejamento` turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub status: String,
    pub priority: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionPayload {
    Idea(IdeaDraft),
    Task(TaskDraft),
    /// Structured data attached to a plain reply; carried but never acted on.
    Data(Map<String, Value>),
}

/// Normalized output of one model turn. Built once by the normalizer and
/// consumed once by the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAction {
    pub reply: String,
    pub kind: ActionKind,
    pub payload: Option<ActionPayload>,
    pub recovery: Recovery,
}

impl ModelAction {
    pub fn reply(text: impl Into<String>, recovery: Recovery) -> Self {
        Self {
            reply: text.into(),
            kind: ActionKind::Reply,
            payload: None,
            recovery,
        }
    }

    pub fn idea(&self) -> Option<&IdeaDraft> {
        match &self.payload {
            Some(ActionPayload::Idea(draft)) => Some(draft),
            _ => None,
        }
    }

    pub fn task(&self) -> Option<&TaskDraft> {
        match &self.payload {
            Some(ActionPayload::Task(draft)) => Some(draft),
            _ => None,
        }
    }
}
