use super::template::{ChatRole, PromptKind};
use thiserror::Error;

/// Errors raised while turning a compiled prompt into call inputs.
///
/// These indicate a template whose shape does not match what the caller
/// expects; they are configuration errors and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("prompt not correctly configured: '{name}' has no {role} message")]
    MissingRole { name: String, role: ChatRole },

    #[error("prompt not correctly configured: '{name}' is a {actual} prompt, expected {expected}")]
    WrongKind {
        name: String,
        expected: PromptKind,
        actual: PromptKind,
    },
}
