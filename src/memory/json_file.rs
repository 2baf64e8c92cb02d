use super::document::{MemoryDocument, PendingAction};
use super::traits::{Memory, PendingActionStore};
use crate::error::MemoryError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Memory persisted as a pretty-printed JSON file.
///
/// A missing or corrupt file is replaced by [`MemoryDocument::default`] on
/// first read. Every read-modify-write cycle runs under one async mutex so
/// concurrent requests never interleave writes.
pub struct JsonFileMemory {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileMemory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> MemoryError {
        MemoryError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    async fn read_document(&self) -> Result<MemoryDocument, MemoryError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "memory file not found; writing default");
                let doc = MemoryDocument::default();
                self.write_document(&doc).await?;
                return Ok(doc);
            }
            Err(e) => return Err(self.io_error(e)),
        };

        match serde_json::from_str::<MemoryDocument>(&raw) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "memory file is invalid; resetting to default");
                let doc = MemoryDocument::default();
                self.write_document(&doc).await?;
                Ok(doc)
            }
        }
    }

    async fn write_document(&self, doc: &MemoryDocument) -> Result<(), MemoryError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        let body = serde_json::to_string_pretty(doc)?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| self.io_error(e))
    }
}

#[async_trait]
impl Memory for JsonFileMemory {
    fn name(&self) -> &str {
        "json-file"
    }

    async fn load(&self) -> anyhow::Result<MemoryDocument> {
        let _guard = self.lock.lock().await;
        Ok(self.read_document().await?)
    }

    async fn update(&self, patch: Map<String, Value>) -> anyhow::Result<MemoryDocument> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        doc.merge(&patch);
        self.write_document(&doc).await?;
        Ok(doc)
    }
}

#[async_trait]
impl PendingActionStore for JsonFileMemory {
    async fn get(&self) -> anyhow::Result<Option<PendingAction>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_document().await?.pending_action())
    }

    async fn set(&self, action: PendingAction) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        doc.set_pending_action(action);
        self.write_document(&doc).await?;
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        if doc.clear_pending_action() {
            self.write_document(&doc).await?;
        }
        Ok(())
    }
}
