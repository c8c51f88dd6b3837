//! Console output formatter for advice runs and evaluation reports

use advisor_application::EvaluationReport;
use advisor_domain::ManagementRun;
use colored::Colorize;

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete run: every advisor, then the summary
    pub fn format(run: &ManagementRun) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Management Advice"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            run.input_text()
        ));
        output.push_str(&format!("{} {}\n", "Model:".cyan().bold(), run.model()));

        output.push_str(&Self::section_header("Advisors"));
        for advice in run.advices().iter() {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!(
                    "── {} ({} v{}) ──",
                    advice.slot, advice.prompt.name, advice.prompt.version
                )
                .yellow()
                .bold(),
                advice.output.content()
            ));
        }

        output.push_str(&Self::section_header("Summary"));
        output.push_str(&format!("\n{}\n", run.summary_text()));

        output.push_str(&format!(
            "\n{} {}   {} ${:.6}\n",
            "Trace:".dimmed(),
            run.trace(),
            "Cost:".dimmed(),
            run.outcome().total_cost()
        ));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(run: &ManagementRun) -> String {
        serde_json::to_string_pretty(run).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the summary only (concise output)
    pub fn format_summary_only(run: &ManagementRun) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Advisors' Summary ===".cyan().bold()));
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), run.input_text()));
        output.push_str(run.summary_text());
        output.push('\n');

        output
    }

    /// Format a batch evaluation report
    pub fn format_report(report: &EvaluationReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Evaluation Report"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Dataset:".cyan().bold(), report.dataset));
        output.push_str(&format!("{} {}\n", "Run:".cyan().bold(), report.run_name));

        output.push_str(&Self::section_header("Items"));
        output.push_str(&format!("  {:<18}{}\n", "total", report.items));
        output.push_str(&format!(
            "  {:<18}{}\n",
            "evaluated",
            report.evaluated.to_string().green()
        ));
        output.push_str(&format!(
            "  {:<18}{}\n",
            "skipped",
            report.skipped.to_string().yellow()
        ));
        output.push_str(&format!("  {:<18}{}\n", "failed", Self::count(report.failed)));
        output.push_str(&format!("  {:<18}{}\n", "linked", report.linked));
        output.push_str(&format!(
            "  {:<18}{}\n",
            "link failures",
            Self::count(report.link_failures)
        ));
        output.push_str(&format!(
            "  {:<18}{}\n",
            "scores submitted", report.scores_submitted
        ));

        if !report.evaluator_failures.is_empty() {
            output.push_str(&Self::section_header("Evaluator Failures"));
            for failure in &report.evaluator_failures {
                output.push_str(&format!(
                    "  {} {} / {}: {}\n",
                    "x".red(),
                    failure.item_id,
                    failure.evaluator.bold(),
                    failure.reason
                ));
            }
        }

        output.push_str(&Self::footer());

        output
    }

    fn count(n: usize) -> String {
        if n == 0 {
            n.to_string()
        } else {
            n.to_string().red().to_string()
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
