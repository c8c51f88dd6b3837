//! Advice domain
//!
//! - [`slot::AdvisorSlot`] - the five fixed advisor positions
//! - [`entities::AdviceOutcome`] - everything a run produced before tracing
//! - [`entities::ManagementRun`] - a completed, traced run
//! - [`phase::Phase`] - stages of a run, for progress reporting

pub mod entities;
pub mod phase;
pub mod slot;
