//! REST client for the notes backend (interests, areas, documents and
//! professional planning cards).

use super::traits::{DocumentSink, TaxonomySource};
use super::types::{Area, Interest, NewDocument, NewPlanningCard};
use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::providers::build_http_client;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

const UNTITLED: &str = "Sem título";

pub struct BackendClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentPayload<'a> {
    id: String,
    title: &'a str,
    cover: &'static str,
    content: &'a str,
    interest: &'a str,
    area: &'a str,
    tags: &'a [String],
    relations: [String; 0],
    created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanningCardPayload<'a> {
    id: String,
    title: &'a str,
    status: &'a str,
    priority: &'a str,
    is_finalized: bool,
    created_at: String,
    updated_at: String,
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl BackendClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_http_client(timeout_secs),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(&config.base_url, config.timeout_secs)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let response = self.client.get(self.url(path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                method: "GET",
                path: path.to_string(),
                status: status.as_u16(),
            }
            .into());
        }
        response.json::<T>().await.map_err(|e| {
            BackendError::Decode {
                path: path.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> anyhow::Result<Value> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                method: "POST",
                path: path.to_string(),
                status: status.as_u16(),
            }
            .into());
        }
        // Some routes answer 201 with an empty body.
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            BackendError::Decode {
                path: path.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl TaxonomySource for BackendClient {
    async fn list_interests(&self) -> anyhow::Result<Vec<Interest>> {
        self.get_json("/api/interests").await
    }

    async fn list_areas(&self) -> anyhow::Result<Vec<Area>> {
        self.get_json("/api/areas").await
    }
}

#[async_trait]
impl DocumentSink for BackendClient {
    async fn create_document(&self, document: NewDocument) -> anyhow::Result<Value> {
        let title = if document.title.trim().is_empty() {
            UNTITLED
        } else {
            document.title.as_str()
        };
        let payload = DocumentPayload {
            id: Uuid::new_v4().to_string(),
            title,
            cover: "",
            content: &document.content,
            interest: &document.interest,
            area: &document.area,
            tags: &document.tags,
            relations: [],
            created_at: now_iso(),
        };
        tracing::debug!(title, interest = %document.interest, area = %document.area, "creating document");
        self.post_json("/api/documents", &payload).await
    }

    async fn create_planning_card(&self, card: NewPlanningCard) -> anyhow::Result<Value> {
        let now = now_iso();
        let payload = PlanningCardPayload {
            id: Uuid::new_v4().to_string(),
            title: &card.title,
            status: &card.status,
            priority: &card.priority,
            is_finalized: false,
            created_at: now.clone(),
            updated_at: now,
        };
        tracing::debug!(title = %card.title, "creating planning card");
        self.post_json("/api/professional-planning/cards", &payload)
            .await
    }
}
