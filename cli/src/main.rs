//! CLI entrypoint for Management Advisor
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use advisor_application::{
    EvaluateManagementInput, EvaluateManagementUseCase, NoProgress, ProgressNotifier,
    RunManagementInput, RunManagementUseCase, TraceCollector,
};
use advisor_domain::{ConfigIssue, Model};
use advisor_infrastructure::{
    ConfigLoader, FileConfig, GeminiClient, LangfuseClient, LangfuseCollector,
    LangfuseDatasetStore, LangfusePromptStore,
};
use advisor_presentation::{
    AppState, Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, router,
};
use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Everything a subcommand needs, built once from the loaded config
struct Services {
    runner: Arc<RunManagementUseCase>,
    evaluator: Arc<EvaluateManagementUseCase>,
    collector: Arc<LangfuseCollector>,
    flush_loop: JoinHandle<()>,
}

impl Services {
    fn build(config: &FileConfig) -> Result<Self> {
        let generator = Arc::new(
            GeminiClient::from_config(&config.gemini)
                .context("Failed to create the generation client")?,
        );
        let langfuse = LangfuseClient::from_config(&config.langfuse)
            .context("Failed to create the observability client")?;

        let prompt_store = Arc::new(LangfusePromptStore::new(
            langfuse.clone(),
            config.langfuse.prompt_label.clone(),
        ));
        let datasets = Arc::new(LangfuseDatasetStore::new(langfuse.clone()));
        let collector = Arc::new(LangfuseCollector::new(langfuse, config.langfuse.batch_size));
        let flush_loop =
            collector.spawn_flush_loop(Duration::from_secs(config.langfuse.flush_interval_secs));

        let runner = Arc::new(RunManagementUseCase::new(
            prompt_store.clone(),
            generator.clone(),
            collector.clone(),
            config.advisor_config()?,
        ));
        let evaluator = Arc::new(EvaluateManagementUseCase::new(
            runner.clone(),
            prompt_store,
            generator,
            collector.clone(),
            datasets,
            config.evaluation_config(),
        ));

        Ok(Self {
            runner,
            evaluator,
            collector,
            flush_loop,
        })
    }

    /// Deliver anything still buffered, then stop the background loop
    async fn shutdown(self) {
        if let Err(e) = self.collector.flush().await {
            warn!("Final trace flush failed: {}", e);
        }
        self.flush_loop.abort();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    info!("Starting Management Advisor");

    // Load configuration from files (unless --no-config)
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    check_config(&config.validate())?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    let show_progress = !cli.quiet && config.output.show_progress;

    let Some(command) = cli.command else {
        bail!("No command given. Run with --help to see the available commands.");
    };

    let services = Services::build(&config)?;

    let result = match command {
        Command::Ask {
            question,
            model,
            output,
        } => {
            let format = output
                .or(config.output.format.map(OutputFormat::from))
                .unwrap_or(OutputFormat::Summary);
            run_ask(&services, question, model.as_deref(), format, show_progress).await
        }
        Command::Evaluate { dataset, model } => {
            run_evaluate(&services, dataset, model.as_deref(), show_progress).await
        }
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or_else(|| config.server.port());
            run_serve(&services, &host, port).await
        }
    };

    services.shutdown().await;
    result
}

/// Console logging at the verbosity from `-v` (or `RUST_LOG` when set),
/// plus a daily rolling file when a log directory is given
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "management-advisor.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Print every issue; refuse to start if any is an error
fn check_config(issues: &[ConfigIssue]) -> Result<()> {
    for issue in issues {
        if issue.is_error() {
            eprintln!("{} {}", "config".red().bold(), issue);
        } else {
            eprintln!("{} {}", "config".yellow().bold(), issue);
        }
    }
    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        bail!("Configuration has {} error(s)", errors);
    }
    Ok(())
}

async fn run_ask(
    services: &Services,
    question: String,
    model: Option<&str>,
    format: OutputFormat,
    show_progress: bool,
) -> Result<()> {
    if question.trim().is_empty() {
        bail!("Question must not be empty");
    }
    let input = RunManagementInput::new(question).with_model(Model::from_override(model));

    let run = if show_progress {
        let progress = ProgressReporter::new();
        services.runner.execute_with_progress(input, &progress).await?
    } else {
        services.runner.execute(input).await?
    };

    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format(&run),
        OutputFormat::Summary => ConsoleFormatter::format_summary_only(&run),
        OutputFormat::Json => ConsoleFormatter::format_json(&run),
    };
    println!("{}", output);

    Ok(())
}

async fn run_evaluate(
    services: &Services,
    dataset: Option<String>,
    model: Option<&str>,
    show_progress: bool,
) -> Result<()> {
    let input = EvaluateManagementInput::new()
        .with_dataset(dataset)
        .with_model(Model::from_override(model));

    let progress: Box<dyn ProgressNotifier> = if show_progress {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(NoProgress)
    };
    let report = services
        .evaluator
        .execute_with_progress(input, progress.as_ref())
        .await?;

    println!("{}", ConsoleFormatter::format_report(&report));

    Ok(())
}

async fn run_serve(services: &Services, host: &str, port: u16) -> Result<()> {
    let app = router(AppState::new(
        services.runner.clone(),
        services.evaluator.clone(),
    ));

    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {}:{}", host, port))?;
    info!("Listening on {}:{}", host, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("HTTP server error")?;

    Ok(())
}
