//! Dataset store backed by Langfuse datasets

use super::client::{LangfuseClient, LangfuseError};
use super::types::{DatasetItemsPage, DatasetResponse, DatasetRunItemRequest};
use advisor_application::ports::dataset_store::{DatasetStore, DatasetStoreError};
use advisor_domain::{Dataset, DatasetItem, TraceHandle};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

const PAGE_SIZE: u32 = 50;

pub struct LangfuseDatasetStore {
    client: LangfuseClient,
}

impl LangfuseDatasetStore {
    pub fn new(client: LangfuseClient) -> Self {
        Self { client }
    }

    /// All items of `name`, page by page, in store order
    async fn items(&self, name: &str) -> Result<Vec<DatasetItem>, DatasetStoreError> {
        let url = self.client.url(&["dataset-items"])?;
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let response: DatasetItemsPage = self
                .client
                .get_json(
                    url.clone(),
                    &[
                        ("datasetName", name.to_string()),
                        ("page", page.to_string()),
                        ("limit", PAGE_SIZE.to_string()),
                    ],
                )
                .await?;

            items.extend(
                response
                    .data
                    .into_iter()
                    .map(|item| DatasetItem::new(item.id, item.input)),
            );

            if response.meta.page >= response.meta.total_pages {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

impl From<LangfuseError> for DatasetStoreError {
    fn from(e: LangfuseError) -> Self {
        match e {
            LangfuseError::Http { status, body } => DatasetStoreError::Api {
                status: status.as_u16(),
                message: body,
            },
            LangfuseError::Decode(msg) => DatasetStoreError::InvalidResponse(msg),
            other => DatasetStoreError::RequestFailed(other.to_string()),
        }
    }
}

#[async_trait]
impl DatasetStore for LangfuseDatasetStore {
    async fn get_dataset(&self, name: &str) -> Result<Dataset, DatasetStoreError> {
        let url = self.client.url(&["v2", "datasets", name])?;
        let dataset: DatasetResponse = self.client.get_json(url, &[]).await.map_err(|e| {
            if e.is_not_found() {
                DatasetStoreError::NotFound(name.to_string())
            } else {
                e.into()
            }
        })?;

        let items = self.items(&dataset.name).await?;
        debug!(dataset = %dataset.name, items = items.len(), "Fetched dataset");

        Ok(Dataset {
            name: dataset.name,
            items,
        })
    }

    async fn link_item(
        &self,
        item: &DatasetItem,
        trace: &TraceHandle,
        run_name: &str,
    ) -> Result<(), DatasetStoreError> {
        let url = self.client.url(&["dataset-run-items"])?;
        let _: Value = self
            .client
            .post_json(
                url,
                &DatasetRunItemRequest {
                    run_name,
                    dataset_item_id: &item.id,
                    trace_id: trace.id(),
                },
            )
            .await?;
        Ok(())
    }
}
