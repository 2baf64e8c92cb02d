use super::types::{Area, Interest, NewDocument, NewPlanningCard};
use async_trait::async_trait;

/// Read-only access to the interest → area taxonomy.
///
/// Snapshots are fetched fresh on every call; callers must not cache them
/// across requests.
#[async_trait]
pub trait TaxonomySource: Send + Sync {
    async fn list_interests(&self) -> anyhow::Result<Vec<Interest>>;
    async fn list_areas(&self) -> anyhow::Result<Vec<Area>>;
}

/// Persistence for notes and planning cards. Returns the stored record as
/// the backend echoed it.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn create_document(&self, document: NewDocument) -> anyhow::Result<serde_json::Value>;
    async fn create_planning_card(
        &self,
        card: NewPlanningCard,
    ) -> anyhow::Result<serde_json::Value>;
}
