//! Dataset store port

use advisor_domain::{Dataset, DatasetItem, TraceHandle};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while reading datasets or linking runs
#[derive(Error, Debug)]
pub enum DatasetStoreError {
    #[error("Dataset '{0}' not found")]
    NotFound(String),

    #[error("Dataset store request failed: {0}")]
    RequestFailed(String),

    #[error("Dataset store API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid dataset payload: {0}")]
    InvalidResponse(String),
}

/// Store of labeled datasets
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Fetch a dataset with all of its items, in store order
    async fn get_dataset(&self, name: &str) -> Result<Dataset, DatasetStoreError>;

    /// Associate the run behind `trace` with `item` under `run_name`
    async fn link_item(
        &self,
        item: &DatasetItem,
        trace: &TraceHandle,
        run_name: &str,
    ) -> Result<(), DatasetStoreError>;
}
