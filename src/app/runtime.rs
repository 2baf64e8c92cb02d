use crate::backend::BackendClient;
use crate::config::Config;
use crate::intake::{Intake, ModelSettings};
use crate::memory::JsonFileMemory;
use crate::providers::OpenRouterProvider;
use std::sync::Arc;

/// Wire the production collaborators described by `config`.
pub fn build_intake(config: &Config) -> Intake {
    let provider = Arc::new(OpenRouterProvider::from_config(&config.llm));
    let backend = Arc::new(BackendClient::from_config(&config.backend));
    let memory = Arc::new(JsonFileMemory::new(config.memory_path()));

    tracing::debug!(
        model = %config.llm.model,
        backend = %config.backend.base_url,
        memory = %memory.path().display(),
        "intake collaborators ready"
    );

    Intake::new(
        provider,
        backend.clone(),
        backend,
        memory.clone(),
        memory,
        ModelSettings::from(&config.llm),
    )
}
