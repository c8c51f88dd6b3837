//! Generation domain
//!
//! The outcome of one text-generation call, the usage-based pricing applied
//! to it, and the fixed generation policy every call is issued with.

pub mod policy;
pub mod pricing;
pub mod result;
