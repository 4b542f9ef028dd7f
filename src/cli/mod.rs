//! Subcommands of the `siam-retention` binary.

mod document;
mod policy;

pub use document::DocumentCommand;
pub use policy::PolicyCommand;

use clap::Subcommand;
use color_eyre::eyre::{eyre, Result};
use serde::Serialize;
use siam_retention::config::parse_interval;
use siam_retention::store::FileTransitionLog;
use siam_retention::sweep::{run_periodic, RetentionSweepJob, ShutdownSignal};
use siam_retention::utils::parse_timestamp;
use siam_retention::{InitResult, JsonStore, RetentionConfig};
use std::path::Path;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory, registry and transition log if missing
    Init,

    /// Run one retention sweep and print its report
    Sweep {
        /// Evaluate as of this instant (RFC 3339 or YYYY-MM-DD) instead of now
        #[arg(long)]
        at: Option<String>,
    },

    /// Sweep periodically until interrupted with Ctrl-C
    Run {
        /// Time between sweeps, e.g. "24h" or "30m" (default from config)
        #[arg(long, env = "SIAM_SWEEP_INTERVAL")]
        interval: Option<String>,
    },

    /// Manage retention policies
    #[command(subcommand)]
    Policy(PolicyCommand),

    /// Manage documents under retention
    #[command(subcommand)]
    Document(DocumentCommand),
}

/// Everything a subcommand needs from startup.
pub struct Context<'a> {
    pub data_dir: &'a Path,
    pub config: &'a RetentionConfig,
    pub init: InitResult,
    pub job: RetentionSweepJob,
    pub store: JsonStore,
    pub shutdown_tx: watch::Sender<ShutdownSignal>,
    pub shutdown_rx: watch::Receiver<ShutdownSignal>,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn execute(command: Command, ctx: Context<'_>) -> Result<()> {
    match command {
        Command::Init => {
            let created: Vec<&str> = ctx.init.created.iter().map(String::as_str).collect();
            print_json(&serde_json::json!({
                "dataDir": ctx.data_dir.display().to_string(),
                "created": created,
            }))
        }
        Command::Sweep { at } => {
            let report = match at.as_deref() {
                Some(at) => ctx.job.run_at(parse_timestamp(at)?).await?,
                None => ctx.job.run().await?,
            };
            print_json(&report)?;
            if report.has_failures() {
                return Err(eyre!(
                    "Sweep {} finished with {} failed updates and {} failed notices",
                    report.run_id,
                    report.failed.len(),
                    report.notification_failures.len()
                ));
            }
            Ok(())
        }
        Command::Run { interval } => {
            let interval = match interval.as_deref() {
                Some(value) => parse_interval(value)?,
                None => ctx.config.sweep.interval()?,
            };
            let tx = ctx.shutdown_tx;
            tokio::spawn(async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!(error = %e, "Failed to listen for Ctrl-C");
                    return;
                }
                info!("Received Ctrl-C, stopping after the current document");
                if tx.send(ShutdownSignal::Shutdown).is_err() {
                    warn!("Scheduler already stopped");
                }
            });
            let runs = run_periodic(&ctx.job, interval, ctx.shutdown_rx).await;
            info!(runs, "Retention scheduler exited");
            Ok(())
        }
        Command::Policy(command) => policy::execute(command, &ctx.store).await,
        Command::Document(command) => {
            let log = FileTransitionLog::open(ctx.data_dir);
            document::execute(command, &ctx.store, &log).await
        }
    }
}

#[cfg(test)]
#[path = "../cli_tests.rs"]
mod tests;
