//! CLI command definitions

use advisor_domain::OutputFormat as DomainOutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for advice runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every advisor's answer followed by the summary
    Full,
    /// Only the summary
    Summary,
    /// JSON output
    Json,
}

impl From<DomainOutputFormat> for OutputFormat {
    fn from(format: DomainOutputFormat) -> Self {
        match format {
            DomainOutputFormat::Full => OutputFormat::Full,
            DomainOutputFormat::Summary => OutputFormat::Summary,
            DomainOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for management-advisor
#[derive(Parser, Debug)]
#[command(name = "management-advisor")]
#[command(author, version, about = "Five advisors, one summary, every run traced")]
#[command(long_about = r#"
Management Advisor puts a question to five advisor personas and folds their
answers into one summary.

Each run has three steps:
1. Advise: the five advisor prompts are answered in parallel
2. Summarize: a summarizer prompt receives all five answers in slot order
3. Record: the run is submitted as a trace to the observability service

Configuration files are loaded from (in priority order):
1. ADVISOR_* environment variables (nested keys use "__")
2. --config <path>     Explicit config file
3. ./advisor.toml or ./.advisor.toml   Project-level config
4. ~/.config/management-advisor/config.toml   Global config

Example:
  management-advisor ask "How do I give feedback to a senior engineer?"
  management-advisor ask --output full -m gemini-2.5-flash "How do I run a 1:1?"
  management-advisor evaluate --dataset management-questions
  management-advisor serve --port 3000
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask the advisors a question
    Ask {
        /// The question to put to the advisors
        question: String,

        /// Model for the advisor and summary calls
        #[arg(short, long, value_name = "MODEL")]
        model: Option<String>,

        /// Output format (defaults to the configured one)
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// Replay a dataset through the advisors and score every summary
    Evaluate {
        /// Dataset to replay (defaults to evaluation.dataset)
        #[arg(short, long, value_name = "NAME")]
        dataset: Option<String>,

        /// Model for the advisor and summary calls
        #[arg(short, long, value_name = "MODEL")]
        model: Option<String>,
    },

    /// Serve the HTTP routes
    Serve {
        /// Address to bind (defaults to server.host)
        #[arg(long, value_name = "HOST")]
        host: Option<String>,

        /// Port to bind (defaults to server.port, then $PORT, then 8080)
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,
    },
}
