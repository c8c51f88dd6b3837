//! Application-level configuration.
//!
//! - [`AdvisorConfig`]: which templates make up an advice run and how it is traced
//! - [`EvaluationConfig`]: dataset replay and scoring settings

pub mod advisor_config;
pub mod evaluation_config;

pub use advisor_config::AdvisorConfig;
pub use evaluation_config::EvaluationConfig;
