use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use super::RetentionSweepJob;

/// Shortest interval the built-in scheduler accepts.
const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Signal sent to stop the periodic sweep loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShutdownSignal {
    #[default]
    None,
    Shutdown,
}

/// Run `job` every `interval` until `shutdown` carries
/// [`ShutdownSignal::Shutdown`] or its sender is dropped.
///
/// The first sweep runs immediately. A failed run is logged and the loop
/// carries on with the next tick. Returns the number of completed runs.
pub async fn run_periodic(
    job: &RetentionSweepJob,
    interval: Duration,
    mut shutdown: watch::Receiver<ShutdownSignal>,
) -> u64 {
    let interval = interval.max(MIN_INTERVAL);
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut completed = 0_u64;

    info!(interval = %humantime::format_duration(interval), "Retention scheduler started");
    loop {
        if *shutdown.borrow() == ShutdownSignal::Shutdown {
            break;
        }
        tokio::select! {
            _ = ticker.tick() => {
                match job.run().await {
                    Ok(report) => {
                        completed = completed.saturating_add(1);
                        if report.has_failures() {
                            warn!(
                                run_id = %report.run_id,
                                failed = report.failed.len(),
                                notification_failures = report.notification_failures.len(),
                                "Retention sweep completed with failures"
                            );
                        }
                    }
                    Err(e) => error!(error = %e, "Retention sweep aborted"),
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }
    info!(runs = completed, "Retention scheduler stopped");
    completed
}
