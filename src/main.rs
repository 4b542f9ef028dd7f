// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::indexing_slicing
    )
)]

mod cli;

use clap::Parser;
use cli::{Command, Context};
use color_eyre::eyre::Result;
use siam_retention::config::{config_path, load_config};
use siam_retention::logging::{init_logging, parse_rotation, LogConfig, LOG_FILENAME};
use siam_retention::notify::LogDispatcher;
use siam_retention::store::{get_siam_home, FileTransitionLog, JsonStore};
use siam_retention::sweep::{RetentionSweepJob, ShutdownSignal};
use siam_retention::utils::format_display_path;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

/// SIAM retention engine - document retention policies and lifecycle sweeps
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Data directory holding the registry and transition log (default: ~/.siam)
    #[arg(long, env = "SIAM_HOME", global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: <data-dir>/config.toml)
    #[arg(long, env = "SIAM_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable JSON log format (for production/log aggregation)
    #[arg(long, env = "SIAM_LOG_JSON", global = true)]
    log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "SIAM_LOG_ROTATION", global = true)]
    log_rotation: Option<String>,

    /// Custom log directory (default: <data-dir>/logs)
    #[arg(long, env = "SIAM_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => get_siam_home()?,
    };
    let config_file = args.config.unwrap_or_else(|| config_path(&data_dir));
    let config = load_config(&config_file)?;

    // Flags win over the config file
    let mut log_config = LogConfig::for_data_dir(&data_dir);
    if let Some(dir) = args.log_dir.or_else(|| config.logging.dir.clone()) {
        log_config.log_dir = dir;
    }
    log_config.json_format = args.log_json || config.logging.json;
    log_config.rotation = parse_rotation(
        args.log_rotation
            .as_deref()
            .unwrap_or(&config.logging.rotation),
    );
    let log_file = log_config.log_dir.join(LOG_FILENAME);

    if let Err(e) = init_logging(log_config) {
        eprintln!();
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!("Logs: {}", log_file.display());
        eprintln!();
        return Err(e);
    }
    debug!(config = %format_display_path(&config_file), "Configuration loaded");

    let init = siam_retention::initialize(&data_dir).await?;

    let store = JsonStore::open(&data_dir);
    let (shutdown_tx, shutdown_rx) = watch::channel(ShutdownSignal::None);
    let mut job = RetentionSweepJob::new(Arc::new(store.clone()), Arc::new(store.clone()))
        .with_transition_log(Arc::new(FileTransitionLog::open(&data_dir)))
        .with_shutdown(shutdown_rx.clone());
    if config.sweep.notify {
        job = job.with_dispatcher(Arc::new(LogDispatcher));
    }

    info!(
        data_dir = %format_display_path(&data_dir),
        command = ?args.command,
        "siam-retention starting"
    );

    cli::execute(
        args.command,
        Context {
            data_dir: &data_dir,
            config: &config,
            init,
            job,
            store,
            shutdown_tx,
            shutdown_rx,
        },
    )
    .await
}
