//! Progress reporting for advice runs and dataset replays

use advisor_application::{ItemStatus, ProgressNotifier};
use advisor_domain::Phase;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with indicatif bars
///
/// A batch gets an item bar that stays on screen while each item's phase
/// bars come and go beneath it.
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
    item_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
            item_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn item_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.magenta} [{bar:40.magenta/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
    }

    fn status_mark(status: ItemStatus) -> String {
        match status {
            ItemStatus::Evaluated => "v".green().to_string(),
            ItemStatus::Skipped => "-".yellow().to_string(),
            ItemStatus::Failed => "x".red().to_string(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(phase.display_name().to_string());
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _phase: &Phase, label: &str, success: bool) {
        if let Ok(slot) = self.phase_bar.lock() {
            if let Some(pb) = slot.as_ref() {
                let status = if success {
                    format!("{} {}", "v".green(), label)
                } else {
                    format!("{} {}", "x".red(), label)
                };
                pb.set_message(status);
                pb.inc(1);
            }
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        if let Some(pb) = self.phase_bar.lock().ok().and_then(|mut slot| slot.take()) {
            // Inside a batch the item bar carries the history
            if self.item_bar.lock().map(|s| s.is_some()).unwrap_or(false) {
                pb.finish_and_clear();
            } else {
                pb.finish_with_message(format!("{} complete!", phase.display_name().green()));
            }
        }
    }

    fn on_item_start(&self, index: usize, total: usize, item_id: &str) {
        if let Ok(mut slot) = self.item_bar.lock() {
            let pb = slot.get_or_insert_with(|| {
                let pb = self.multi.add(ProgressBar::new(total as u64));
                pb.set_style(Self::item_style());
                pb.set_prefix("Dataset");
                pb
            });
            pb.set_position(index as u64);
            pb.set_message(item_id.to_string());
        }
    }

    fn on_item_complete(&self, item_id: &str, status: ItemStatus) {
        if let Ok(mut slot) = self.item_bar.lock() {
            if let Some(pb) = slot.as_ref() {
                pb.set_message(format!("{} {}", Self::status_mark(status), item_id));
                pb.inc(1);
                if pb.length().is_some_and(|len| pb.position() >= len) {
                    pb.finish_with_message(format!("{}", "all items attempted".green()));
                    *slot = None;
                }
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        println!(
            "{} {} ({} tasks)",
            "->".cyan(),
            phase.display_name().bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _phase: &Phase, label: &str, success: bool) {
        if success {
            println!("  {} {}", "v".green(), label);
        } else {
            println!("  {} {} (failed)", "x".red(), label);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {
        println!();
    }

    fn on_item_start(&self, index: usize, total: usize, item_id: &str) {
        println!("{} item {}/{}: {}", "=>".magenta(), index + 1, total, item_id);
    }

    fn on_item_complete(&self, item_id: &str, status: ItemStatus) {
        println!("{} {}", ProgressReporter::status_mark(status), item_id);
    }
}
