//! Conversational intake: model output normalization, taxonomy resolution,
//! idea refinement and the save/task workflows built on top of them.

pub mod action;
pub mod intent;
pub mod normalize;
pub mod orchestrator;
pub mod prompt;
pub mod refine;
pub mod replies;
pub mod taxonomy;

pub use action::{ActionKind, ActionPayload, IdeaDraft, ModelAction, Recovery, TaskDraft};
pub use normalize::{extract_json, normalize, repair_missing_commas};
pub use orchestrator::{Intake, SaveOutcome, TaskOutcome};
pub use refine::{IdeaRefiner, Refinement};
pub use taxonomy::{
    MatchOutcome, ResolvedCategory, TaxonomySnapshot, match_area, match_interest, normalize_name,
    resolve_category, resolve_pair,
};

use crate::config::LlmConfig;

/// Model name and sampling temperature shared by every model call.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f64,
}

impl From<&LlmConfig> for ModelSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }
}
