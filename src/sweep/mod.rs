//! Periodic reconciliation of document status against retention policy.

mod report;
mod schedule;

pub use report::{
    SkipReason, SkippedDocument, StatusTransition, SweepError, SweepFailure, SweepReport,
};
pub use schedule::{run_periodic, ShutdownSignal};

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::document::Document;
use crate::metrics::{generate_run_id, OperationTimer};
use crate::notify::{NotificationDispatcher, RetentionNotice};
use crate::retention::{resolve_status, should_notify, RetentionPolicy};
use crate::store::{DocumentStore, PolicyStore, StoreError, TransitionLog, TransitionRecord};

/// Batch job that re-resolves the status of every active document with a
/// retention policy and persists the ones that changed.
///
/// Per-document problems (unresolvable policy, failed write, failed notice)
/// are logged and reported; only failing to enumerate documents or policies
/// aborts the run.
pub struct RetentionSweepJob {
    policies: Arc<dyn PolicyStore>,
    documents: Arc<dyn DocumentStore>,
    dispatcher: Option<Arc<dyn NotificationDispatcher>>,
    transitions: Option<Arc<dyn TransitionLog>>,
    shutdown: Option<watch::Receiver<ShutdownSignal>>,
}

impl RetentionSweepJob {
    #[must_use]
    pub fn new(policies: Arc<dyn PolicyStore>, documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            policies,
            documents,
            dispatcher: None,
            transitions: None,
            shutdown: None,
        }
    }

    /// Send advance notices through `dispatcher`.
    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Append every persisted transition to `log`.
    #[must_use]
    pub fn with_transition_log(mut self, log: Arc<dyn TransitionLog>) -> Self {
        self.transitions = Some(log);
        self
    }

    /// Stop between documents once `shutdown` carries [`ShutdownSignal::Shutdown`].
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<ShutdownSignal>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Sweep as of the current time.
    pub async fn run(&self) -> Result<SweepReport, SweepError> {
        self.run_at(Utc::now()).await
    }

    /// Sweep as of `now`.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<SweepReport, SweepError> {
        let run_id = generate_run_id();
        let span = info_span!("retention_sweep", run_id = %run_id);
        self.sweep(run_id, now).instrument(span).await
    }

    async fn sweep(&self, run_id: String, now: DateTime<Utc>) -> Result<SweepReport, SweepError> {
        let timer = OperationTimer::new("retention_sweep");

        let documents = self
            .documents
            .list_active_with_policy()
            .await
            .map_err(SweepError::ListDocuments)?;
        let policies: HashMap<String, RetentionPolicy> = self
            .policies
            .list_policies()
            .await
            .map_err(SweepError::ListPolicies)?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        info!(
            candidates = documents.len(),
            policies = policies.len(),
            now = %now.to_rfc3339(),
            "Starting retention sweep"
        );

        let mut report = SweepReport::new(run_id, now);
        for document in &documents {
            if self.shutdown_requested() {
                warn!(
                    remaining = documents.len().saturating_sub(report.scanned),
                    "Shutdown requested; stopping retention sweep early"
                );
                report.interrupted = true;
                break;
            }
            report.scanned = report.scanned.saturating_add(1);
            self.process(document, &policies, now, &mut report).await;
        }

        report.duration_ms = u64::try_from(timer.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            scanned = report.scanned,
            transitioned = report.transitions.len(),
            unchanged = report.unchanged,
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            notified = report.notified.len(),
            "Retention sweep finished"
        );
        Ok(report)
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown
            .as_ref()
            .is_some_and(|rx| *rx.borrow() == ShutdownSignal::Shutdown)
    }

    async fn process(
        &self,
        document: &Document,
        policies: &HashMap<String, RetentionPolicy>,
        now: DateTime<Utc>,
        report: &mut SweepReport,
    ) {
        let Some(policy_id) = document.retention_policy_id.as_deref() else {
            report.unchanged = report.unchanged.saturating_add(1);
            return;
        };
        let Some(policy) = policies.get(policy_id) else {
            warn!(
                document_id = %document.id,
                policy_id = %policy_id,
                "Retention policy not found; skipping document"
            );
            report.skipped.push(SkippedDocument {
                document_id: document.id.clone(),
                policy_id: policy_id.to_string(),
                reason: SkipReason::PolicyNotFound,
            });
            return;
        };

        let next = resolve_status(document, Some(policy), now);
        if next == document.status {
            report.unchanged = report.unchanged.saturating_add(1);
            self.notify_if_due(document, policy, now, report).await;
            return;
        }

        let record = TransitionRecord {
            document_id: document.id.clone(),
            policy_id: policy.id.clone(),
            from: document.status,
            to: next,
            at: now,
        };
        match self.documents.update_status(&record).await {
            Ok(()) => {}
            Err(StoreError::DocumentChanged(_)) => {
                warn!(
                    document_id = %document.id,
                    "Document changed during sweep; leaving it for the next run"
                );
                report.skipped.push(SkippedDocument {
                    document_id: document.id.clone(),
                    policy_id: policy.id.clone(),
                    reason: SkipReason::DocumentChanged,
                });
                return;
            }
            Err(e) => {
                error!(
                    document_id = %document.id,
                    error = %e,
                    "Failed to update document status"
                );
                report.failed.push(SweepFailure {
                    document_id: document.id.clone(),
                    error: e.to_string(),
                });
                return;
            }
        }

        info!(
            document_id = %document.id,
            from = %document.status,
            to = %next,
            action = %policy.action,
            "Document retention status changed"
        );
        if let Some(log) = &self.transitions {
            if let Err(e) = log.append(&record).await {
                warn!(document_id = %document.id, error = %e, "Failed to record transition");
            }
        }
        report.transitions.push(StatusTransition {
            document_id: record.document_id,
            policy_id: record.policy_id,
            from: record.from,
            to: record.to,
        });
    }

    /// At most one notice per document per UTC day.
    async fn notify_if_due(
        &self,
        document: &Document,
        policy: &RetentionPolicy,
        now: DateTime<Utc>,
        report: &mut SweepReport,
    ) {
        let Some(dispatcher) = &self.dispatcher else {
            return;
        };
        if !should_notify(document, policy, now) {
            return;
        }
        let today = now.date_naive();
        if document.was_notified_on(today) {
            debug!(document_id = %document.id, "Advance notice already sent today");
            return;
        }
        let Some(notice) = RetentionNotice::for_document(document, policy, now) else {
            return;
        };

        if let Err(e) = dispatcher.dispatch(&notice).await {
            warn!(document_id = %document.id, error = %e, "Failed to dispatch retention notice");
            report.notification_failures.push(SweepFailure {
                document_id: document.id.clone(),
                error: e.to_string(),
            });
            return;
        }
        report.notified.push(document.id.clone());

        if let Err(e) = self.documents.mark_notified(&document.id, today).await {
            warn!(
                document_id = %document.id,
                error = %e,
                "Notice sent but not recorded; it may be repeated"
            );
            report.notification_failures.push(SweepFailure {
                document_id: document.id.clone(),
                error: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
#[path = "../sweep_tests.rs"]
mod tests;
