//! Domain error types

use crate::advice::slot::AdvisorSlot;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Advice for {0} is missing")]
    MissingAdvice(AdvisorSlot),

    #[error("Advice for {0} was produced more than once")]
    DuplicateAdvice(AdvisorSlot),

    #[error("Expected {expected} advisor prompts, got {found}")]
    AdvisorCount { expected: usize, found: usize },
}
