//! Evaluation domain
//!
//! Model-based evaluators and the parsing of their verdicts.

pub mod evaluator;
pub mod score;
