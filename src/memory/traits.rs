use super::document::{MemoryDocument, PendingAction};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Long-lived user memory (profile, preferences) fed into the main prompt.
#[async_trait]
pub trait Memory: Send + Sync {
    fn name(&self) -> &str;

    async fn load(&self) -> anyhow::Result<MemoryDocument>;

    /// Deep-merge `patch` into the stored document and return the new state.
    async fn update(&self, patch: Map<String, Value>) -> anyhow::Result<MemoryDocument>;
}

/// Single-slot store for one action awaiting user confirmation. No history.
#[async_trait]
pub trait PendingActionStore: Send + Sync {
    async fn get(&self) -> anyhow::Result<Option<PendingAction>>;
    async fn set(&self, action: PendingAction) -> anyhow::Result<()>;
    async fn clear(&self) -> anyhow::Result<()>;
}
