//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: text-generation models an advice run can target
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
