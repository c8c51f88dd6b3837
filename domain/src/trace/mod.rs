//! Trace domain
//!
//! The execution record submitted to the observability collector for each
//! run: one root trace, named spans under it, and generation records under
//! each span.

pub mod builder;
pub mod handle;
pub mod records;

/// Tag attached to traces of evaluation runs
pub const EVALUATION_TAG: &str = "evaluation";

/// Span holding the five advisor generations
pub const ADVICE_SPAN_NAME: &str = "Advise from each managers";

/// Span holding the summary generation
pub const SUMMARY_SPAN_NAME: &str = "Summary advices";

/// Generation record name for the summarizer call
pub const SUMMARY_GENERATION_NAME: &str = "summary";
