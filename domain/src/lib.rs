//! Domain layer for management-advisor
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Advice run
//!
//! A question is put to five advisor personas independently, then a
//! summarizer folds their answers into one response:
//!
//! - **Advisors**: five fixed slots, each backed by its own chat prompt
//! - **Summary**: one chat prompt parameterized by all five advices, in slot order
//!
//! ## Trace tree
//!
//! Every completed run is mirrored by a two-level trace: one root trace, an
//! advice span holding five generation records, and a summary span holding one.
//!
//! ## Evaluation
//!
//! Dataset replays score each summary with model-based evaluators whose
//! output must parse as `{value, comment}`.

pub mod advice;
pub mod config;
pub mod core;
pub mod dataset;
pub mod evaluation;
pub mod generation;
pub mod prompt;
pub mod trace;

// Re-export commonly used types
pub use advice::{
    entities::{AdviceOutcome, AdviceRecord, Advices, ManagementRun, SummaryRecord},
    phase::Phase,
    slot::AdvisorSlot,
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, model::Model};
pub use dataset::{Dataset, DatasetItem};
pub use evaluation::{
    evaluator::Evaluator,
    score::{EvaluationParseError, EvaluationScore, ScoreVerdict, parse_evaluation_output},
};
pub use generation::{
    policy::{HarmBlockThreshold, HarmCategory, ModelParameters, SafetySetting},
    pricing,
    result::GenerationResult,
};
pub use prompt::{
    ChatMessage, ChatPair, ChatRole, CompiledPrompt, PromptBody, PromptError, PromptIdentity,
    PromptKind, PromptParams, PromptTemplate,
};
pub use trace::{
    builder::TraceTree,
    handle::{SpanHandle, TraceHandle},
    records::{CostDetails, GenerationRecord, SpanNode, SpanRecord, TraceRecord, UsageDetails},
};
