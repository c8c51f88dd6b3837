//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod evaluate_management;
pub mod record_trace;
pub mod resolve_prompts;
pub mod run_management;

#[cfg(test)]
pub(crate) mod test_support;
