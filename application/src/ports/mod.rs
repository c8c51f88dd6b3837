//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.
//! Every method on an async port is a suspension point; nothing else in the
//! application layer blocks.

pub mod dataset_store;
pub mod generation;
pub mod progress;
pub mod prompt_store;
pub mod trace_collector;
