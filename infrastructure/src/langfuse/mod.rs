//! Langfuse adapters
//!
//! One authenticated HTTP client backs three ports:
//!
//! - [`LangfusePromptStore`] - versioned prompt templates by label
//! - [`LangfuseDatasetStore`] - datasets and run links
//! - [`LangfuseCollector`] - buffered trace/span/generation/score ingestion

mod client;
mod collector;
mod dataset_store;
mod prompt_store;
mod types;

pub use client::{LangfuseClient, LangfuseError};
pub use collector::LangfuseCollector;
pub use dataset_store::LangfuseDatasetStore;
pub use prompt_store::LangfusePromptStore;
