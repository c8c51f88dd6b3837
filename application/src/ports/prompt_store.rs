//! Prompt store port

use advisor_domain::{PromptKind, PromptTemplate};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while fetching a prompt template
#[derive(Error, Debug)]
pub enum PromptStoreError {
    #[error("Prompt '{0}' not found")]
    NotFound(String),

    #[error("Prompt '{name}' is a {actual} prompt, requested {expected}")]
    TypeMismatch {
        name: String,
        expected: PromptKind,
        actual: PromptKind,
    },

    #[error("Prompt store request failed: {0}")]
    RequestFailed(String),

    #[error("Prompt store API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid prompt payload: {0}")]
    InvalidResponse(String),
}

/// Source of named, versioned prompt templates
///
/// Every call is one round trip; implementations do not cache, so each
/// resolution is authoritative for the run that made it.
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Fetch the current template named `name`, which must be of `kind`.
    async fn get_prompt(
        &self,
        name: &str,
        kind: PromptKind,
    ) -> Result<PromptTemplate, PromptStoreError>;
}
