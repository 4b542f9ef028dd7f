use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use color_eyre::eyre::{eyre, Result};
use serde::Serialize;
use siam_retention::document::{Document, DocumentStatus, NewDocument};
use siam_retention::retention::{is_expired, notification_window, NotificationWindow};
use siam_retention::store::{FileTransitionLog, TransitionRecord};
use siam_retention::utils::parse_timestamp;
use siam_retention::{JsonStore, PolicyStore, RetentionPolicy};

use super::print_json;

#[derive(Subcommand, Debug)]
pub enum DocumentCommand {
    /// Register a document with the retention store
    Register(RegisterDocumentArgs),

    /// List documents, oldest index date first
    List {
        /// Only documents with this status
        #[arg(long)]
        status: Option<DocumentStatus>,
    },

    /// Show one document with its policy, expiry and notice window
    Show { id: String },

    /// Show the recorded status transitions of one document
    History { id: String },

    /// Attach a retention policy, or detach it when `--policy` is omitted
    Assign {
        id: String,

        #[arg(long)]
        policy: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct RegisterDocumentArgs {
    #[arg(long)]
    pub title: String,

    /// Date retention counting starts (RFC 3339 or YYYY-MM-DD)
    #[arg(long)]
    pub index_date: String,

    /// Retention policy id
    #[arg(long)]
    pub policy: Option<String>,

    /// Tag; repeat for several
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    #[arg(long, default_value = "active")]
    pub status: DocumentStatus,
}

impl RegisterDocumentArgs {
    pub fn into_new_document(self) -> Result<NewDocument> {
        let mut new = NewDocument::new(self.title, parse_timestamp(&self.index_date)?)
            .with_tags(self.tags)
            .with_status(self.status);
        if let Some(policy) = self.policy {
            new = new.with_policy(policy);
        }
        Ok(new)
    }
}

/// A document as presented by `document show`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub document: Document,
    pub policy: Option<RetentionPolicy>,
    pub notification_window: Option<NotificationWindow>,
    pub expired: bool,
}

pub async fn describe(store: &JsonStore, id: &str, now: DateTime<Utc>) -> Result<DocumentView> {
    let document = store
        .get_document(id)
        .await?
        .ok_or_else(|| eyre!("Document not found: {id}"))?;
    let policy = match document.retention_policy_id.as_deref() {
        Some(policy_id) => store.get_policy(policy_id).await?,
        None => None,
    };
    Ok(DocumentView {
        notification_window: policy
            .as_ref()
            .and_then(|p| notification_window(&document, p)),
        expired: is_expired(&document, now),
        policy,
        document,
    })
}

/// Transitions recorded for `id`, oldest first.
pub async fn history(log: &FileTransitionLog, id: &str) -> Result<Vec<TransitionRecord>> {
    let mut records = log.read_all().await?;
    records.retain(|r| r.document_id == id);
    Ok(records)
}

pub async fn execute(
    command: DocumentCommand,
    store: &JsonStore,
    log: &FileTransitionLog,
) -> Result<()> {
    match command {
        DocumentCommand::Register(args) => {
            print_json(&store.register_document(args.into_new_document()?).await?)
        }
        DocumentCommand::List { status } => {
            let mut documents = store.list_documents().await?;
            if let Some(status) = status {
                documents.retain(|d| d.status == status);
            }
            print_json(&documents)
        }
        DocumentCommand::Show { id } => print_json(&describe(store, &id, Utc::now()).await?),
        DocumentCommand::History { id } => print_json(&history(log, &id).await?),
        DocumentCommand::Assign { id, policy } => {
            print_json(&store.assign_policy(&id, policy.as_deref()).await?)
        }
    }
}
