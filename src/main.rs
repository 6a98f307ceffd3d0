//! # Main Entry Point
//!
//! Initializes the application:
//! - Domain: Configuration, Schema and Types
//! - Infrastructure: LLM backends, host tools
//! - Application: Interpreter, Validator, Executors, Transcript
//! - Interface: one-shot CLI and interactive shell
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;

use crate::application::pipeline::Pipeline;
use crate::domain::config::AppConfig;
use crate::domain::paths;
use crate::domain::traits::LlmProvider;
use crate::infrastructure::llm::Client as LlmClient;
use crate::infrastructure::tools::executor::ToolExecutor;
use crate::interface::cli::{self, Args};
use crate::strings::logs;

/// File layer always (when the log directory is usable), console layer with `--verbose`.
fn init_logging(config: &AppConfig, verbose: bool) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let log_dir = paths::log_dir(config.logging.directory.as_deref());
    let (file_layer, guard) = match fs::create_dir_all(&log_dir) {
        Ok(()) => {
            // Clear previous session log
            let log_path = log_dir.join(paths::SESSION_LOG);
            if log_path.exists() {
                let _ = fs::remove_file(&log_path);
            }

            let file_appender = tracing_appender::rolling::never(&log_dir, paths::SESSION_LOG);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("Logging to file disabled ({}): {}", log_dir.display(), e);
            (None, None)
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "{},hyper=warn,reqwest=warn",
            config.logging.level
        ))
    });

    let console_layer = if verbose {
        Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let (config, source) = AppConfig::load(args.config.as_deref())?;

    // 2. Logging Setup
    let _guard = init_logging(&config, args.verbose)?;
    match &source {
        Some(path) => tracing::info!("{}", logs::config_loaded(&path.display().to_string())),
        None => tracing::info!("{}", logs::CONFIG_DEFAULTS),
    }

    let allow_list = config.allow_list();
    if allow_list.is_empty() {
        tracing::warn!("{}", logs::NO_TOOLS_ALLOWED);
    }
    let allowed = allow_list.iter().collect::<Vec<_>>().join(", ");
    tracing::info!(
        "{}",
        logs::session_start(&config.pipeline.interpreter, &config.pipeline.rewriter, &allowed)
    );

    // 3. Pipeline
    let llm: Arc<dyn LlmProvider> = Arc::new(LlmClient::new(config.clone()));
    let pipeline = Arc::new(Pipeline::new(&config, llm, ToolExecutor::new()));

    // 4. One-shot or interactive
    match args.prompt_text() {
        Some(text) => println!("{}", cli::run_once(&pipeline, &text, args.dry_run).await),
        None => interface::shell::run(pipeline, args.dry_run).await?,
    }

    tracing::info!("{}", logs::SHUTDOWN);
    Ok(())
}
