//! CLI entrypoint for ollama-chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use chat_application::{SendOutcome, StreamController};
use chat_infrastructure::{ConfigLoader, FileConfig, OllamaChatGateway};
use chat_presentation::{ChatRepl, Cli, OutputConfig, ReplConfig, TerminalView};
use clap::Parser;
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(&cli)?;

    info!("Starting ollama-chat");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = load_config(&cli)?;

    OutputConfig {
        color: config.output.color && !cli.no_color,
    }
    .apply();

    let repl_config = if std::io::stdout().is_terminal() {
        ReplConfig::default()
    } else {
        ReplConfig::plain()
    };

    // === Dependency Injection ===
    let gateway = Arc::new(
        OllamaChatGateway::new(config.ollama.base_url.as_str())
            .with_context(|| format!("Invalid Ollama URL '{}'", config.ollama.base_url))?,
    );
    let view = Arc::new(TerminalView::new(repl_config));
    let controller =
        Arc::new(StreamController::new(gateway, config.to_chat_config()).with_observer(view));
    let repl = ChatRepl::new(controller);

    // Single prompt mode
    if let Some(prompt) = cli.prompt.as_deref() {
        return match repl.run_once(prompt).await? {
            SendOutcome::Completed(_) => Ok(()),
            SendOutcome::Unfinished { .. } => {
                warn!("Response ended before the model finished");
                Ok(())
            }
            SendOutcome::Cancelled => bail!("Request cancelled"),
            SendOutcome::Failed(failure) => Err(anyhow!(failure.message())),
        };
    }

    repl.run().await?;
    Ok(())
}

/// Install the tracing subscriber.
///
/// The level comes from `-v` unless `RUST_LOG` is set. Logs go to stderr, or
/// to `--log-file` through a non-blocking writer.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match &cli.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Could not open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();

            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();

            Ok(None)
        }
    }
}

/// Resolve file and environment configuration, then apply CLI overrides.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(model) = &cli.model {
        config.ollama.model = model.clone();
    }
    if let Some(url) = &cli.url {
        config.ollama.base_url = url.clone();
    }

    for issue in config.validate() {
        warn!("Configuration issue: {}", issue);
    }

    Ok(config)
}
