//! owner-capture
//!
//! Entry point: loads configuration, opens the shared handoff store and runs
//! one workflow stage against a headless page host.

mod cli;
mod cmd_stage;
mod cmd_store;
mod headless;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use capture_config::{Config, ConfigLoader, ConfigValidator};
use capture_handoff::{FileBackend, HandoffStore};

use cli::{Cli, Commands};

/// Get the owner-capture data directory (~/.owner-capture).
fn capture_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".owner-capture"))
        .unwrap_or_else(|| PathBuf::from(".owner-capture"))
}

/// Initialize tracing with console and file output.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = capture_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("owner-capture")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushes the file writer on exit.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| capture_dir().join("config.toml"));

    let config = ConfigLoader::load_or_default(&path)?;
    if !path.exists() {
        info!("No config at {}, using defaults", path.display());
    }

    let warnings = ConfigValidator::validate(&config).into_result()?;
    for warning in warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    Ok(config)
}

async fn open_store(
    config: &Config,
    path: Option<PathBuf>,
) -> Result<HandoffStore, Box<dyn std::error::Error>> {
    let path = path.unwrap_or_else(|| config.store.resolved_path());
    let backend = FileBackend::new(path).await?;
    info!("Using handoff store {}", backend.path().display());
    Ok(HandoffStore::new(Arc::new(backend)))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Classify { url } => cmd_stage::classify(&url, &config),
        Commands::Extract { page } => cmd_stage::extract(&page),
        Commands::Trigger { name, page, origin } => {
            let store = open_store(&config, cli.store).await?;
            cmd_stage::trigger(name.as_deref(), page.as_deref(), &origin, &config, store).await
        }
        Commands::Search { page } => {
            let store = open_store(&config, cli.store).await?;
            cmd_stage::search(page.as_deref(), &config, store).await
        }
        Commands::Results { page, panel } => {
            let store = open_store(&config, cli.store).await?;
            cmd_stage::results(&page, &panel, &config, store).await
        }
        Commands::Deliver { page, url } => {
            let store = open_store(&config, cli.store).await?;
            cmd_stage::deliver(&page, url.as_deref(), &config, store).await
        }
        Commands::Watch { origin } => {
            let store = open_store(&config, cli.store).await?;
            cmd_stage::watch(&origin, &config, store).await
        }
        Commands::Store { action } => {
            let store = open_store(&config, cli.store).await?;
            cmd_store::handle_store_command(action, store).await
        }
    }
}
