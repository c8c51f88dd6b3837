//! Progress notification port
//!
//! Defines the interface for reporting progress during advice runs and
//! dataset evaluation.

use advisor_domain::Phase;

/// Callback for progress updates
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, logs, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// Called when a task completes within a phase
    fn on_task_complete(&self, phase: &Phase, label: &str, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &Phase);

    // ==================== Batch Callbacks ====================

    /// Called before a dataset item is replayed (`index` is zero-based)
    fn on_item_start(&self, _index: usize, _total: usize, _item_id: &str) {}

    /// Called after a dataset item has been handled
    fn on_item_complete(&self, _item_id: &str, _status: ItemStatus) {}
}

/// How a dataset item ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    /// Run completed (individual evaluators may still have failed)
    Evaluated,
    /// Input was not text
    Skipped,
    /// The advice run itself failed
    Failed,
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_task_complete(&self, _phase: &Phase, _label: &str, _success: bool) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
}
