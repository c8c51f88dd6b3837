//! Wire types for the Langfuse public API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ==================== Prompts ====================

/// `GET /api/public/v2/prompts/{name}`
#[derive(Debug, Deserialize)]
pub(super) struct PromptResponse {
    pub name: String,
    pub version: u32,
    #[serde(rename = "type")]
    pub kind: String,
    /// String for text prompts, message list for chat prompts
    pub prompt: Value,
}

/// One entry of a chat prompt. Placeholder entries carry no role.
#[derive(Debug, Deserialize)]
pub(super) struct ChatEntry {
    pub role: Option<String>,
    #[serde(default)]
    pub content: String,
}

// ==================== Datasets ====================

/// `GET /api/public/v2/datasets/{name}`
#[derive(Debug, Deserialize)]
pub(super) struct DatasetResponse {
    pub name: String,
}

/// `GET /api/public/dataset-items`
#[derive(Debug, Deserialize)]
pub(super) struct DatasetItemsPage {
    pub data: Vec<DatasetItemResponse>,
    pub meta: PageMeta,
}

#[derive(Debug, Deserialize)]
pub(super) struct DatasetItemResponse {
    pub id: String,
    #[serde(default)]
    pub input: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PageMeta {
    pub page: u32,
    pub total_pages: u32,
}

/// `POST /api/public/dataset-run-items`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DatasetRunItemRequest<'a> {
    pub run_name: &'a str,
    pub dataset_item_id: &'a str,
    pub trace_id: &'a str,
}

// ==================== Ingestion ====================

/// `POST /api/public/ingestion`
#[derive(Debug, Serialize)]
pub(super) struct IngestionBatch<'a> {
    pub batch: &'a [IngestionEvent],
}

/// One envelope in an ingestion batch
#[derive(Debug, Clone, Serialize)]
pub(super) struct IngestionEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub body: Value,
}

/// Per-event outcome of an ingestion request (HTTP 207)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct IngestionResponse {
    pub successes: Vec<IngestionOutcome>,
    pub errors: Vec<IngestionOutcome>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct IngestionOutcome {
    pub id: String,
    pub status: u16,
    pub message: Option<String>,
}
