//! Command-line client for the to-do API

mod commands;
mod config;
mod logging;
mod token_store;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::Commands;
use std::path::PathBuf;
use todo_http::client::{ClientError, TodoClient};
use token_store::FileTokenStore;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Manage your to-do list from the terminal")]
#[command(version)]
struct Cli {
    /// API base URL (overrides the config file and TODO_BASE_URL)
    #[arg(short = 'u', long, global = true)]
    base_url: Option<String>,

    /// Settings file (TOML or YAML)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the session token and logs
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Per-request timeout in seconds (0 = no timeout)
    #[arg(short = 't', long, global = true)]
    timeout: Option<u64>,

    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = config::data_dir(cli.data_dir);
    logging::init_logging(cli.log_level.into(), &data_dir, cli.no_file_log)?;

    let settings = config::load_settings(cli.config.as_deref(), cli.base_url, cli.timeout)?;
    debug!(base_url = %settings.base_url, data_dir = %data_dir.display(), "Starting to-do CLI");

    let client = TodoClient::builder()
        .settings(&settings)
        .token_store(FileTokenStore::in_dir(&data_dir).into_shared())
        .build()?;
    commands::cancel_on_ctrl_c(client.cancellation().clone());

    match cli.command.execute(&client).await {
        Ok(()) => Ok(()),
        Err(e) => {
            if matches!(e.downcast_ref::<ClientError>(), Some(ClientError::Cancelled)) {
                error!("Cancelled");
            } else {
                error!("Command failed: {e:#}");
            }
            std::process::exit(1);
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
