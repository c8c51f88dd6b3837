//! Application layer for management-advisor
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AdvisorConfig, EvaluationConfig};
pub use ports::{
    dataset_store::{DatasetStore, DatasetStoreError},
    generation::{GenerationClient, GenerationError},
    progress::{ItemStatus, NoProgress, ProgressNotifier},
    prompt_store::{PromptStore, PromptStoreError},
    trace_collector::{CollectorError, TraceCollector},
};
pub use use_cases::evaluate_management::{
    EvaluateManagementError, EvaluateManagementInput, EvaluateManagementUseCase,
    EvaluationReport, EvaluatorError, EvaluatorFailure,
};
pub use use_cases::record_trace::TraceRecorder;
pub use use_cases::resolve_prompts::PromptResolver;
pub use use_cases::run_management::{
    RunManagementError, RunManagementInput, RunManagementUseCase,
};
