//! Infrastructure layer for management-advisor
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod langfuse;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileEvaluationConfig, FileGeminiConfig, FileLangfuseConfig,
    FileModelsConfig, FileOutputConfig, FilePromptsConfig, FileServerConfig, FileTraceConfig,
};
pub use gemini::GeminiClient;
pub use langfuse::{
    LangfuseClient, LangfuseCollector, LangfuseDatasetStore, LangfuseError, LangfusePromptStore,
};
