use super::document::{MemoryDocument, PendingAction};
use super::traits::{Memory, PendingActionStore};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

/// Process-local memory, used for one-shot CLI runs and tests.
pub struct InMemoryStore {
    doc: Mutex<MemoryDocument>,
}

impl InMemoryStore {
    pub fn new(doc: MemoryDocument) -> Self {
        Self {
            doc: Mutex::new(doc),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(MemoryDocument::default())
    }
}

#[async_trait]
impl Memory for InMemoryStore {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn load(&self) -> anyhow::Result<MemoryDocument> {
        Ok(self.doc.lock().await.clone())
    }

    async fn update(&self, patch: Map<String, Value>) -> anyhow::Result<MemoryDocument> {
        let mut doc = self.doc.lock().await;
        doc.merge(&patch);
        Ok(doc.clone())
    }
}

#[async_trait]
impl PendingActionStore for InMemoryStore {
    async fn get(&self) -> anyhow::Result<Option<PendingAction>> {
        Ok(self.doc.lock().await.pending_action())
    }

    async fn set(&self, action: PendingAction) -> anyhow::Result<()> {
        self.doc.lock().await.set_pending_action(action);
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        self.doc.lock().await.clear_pending_action();
        Ok(())
    }
}
