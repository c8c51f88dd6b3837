//! Prompt domain
//!
//! Named, versioned prompt templates fetched from the prompt store and the
//! compilation step that binds them to a parameter mapping.

mod compiled;
mod error;
mod params;
mod template;

pub use compiled::{ChatPair, CompiledPrompt};
pub use error::PromptError;
pub use params::PromptParams;
pub use template::{
    ChatMessage, ChatRole, PromptBody, PromptIdentity, PromptKind, PromptTemplate, render,
};
