//! Text generation port
//!
//! Defines the interface for single calls to the text-generation service.

use advisor_domain::{GenerationResult, Model};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a generation call
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Generation API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Client for the text-generation service
///
/// One call is one round trip with the fixed generation policy (temperature,
/// output cap, safety filter). Implementations do not retry, and a response
/// without text or usage data yields empty content and zero tokens rather
/// than an error.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate text for `user_text` under `system_instruction`.
    ///
    /// `system_instruction` may be empty, in which case none is sent.
    async fn generate(
        &self,
        system_instruction: &str,
        user_text: &str,
        model: &Model,
    ) -> Result<GenerationResult, GenerationError>;
}
