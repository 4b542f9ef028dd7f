use clap::{Args, Subcommand};
use color_eyre::eyre::{eyre, Result};
use siam_retention::retention::{PolicyDraft, PolicyUpdate, RetentionAction};
use siam_retention::{JsonStore, PolicyStore};

use super::print_json;

#[derive(Subcommand, Debug)]
pub enum PolicyCommand {
    /// List all policies
    List,

    /// Show one policy
    Show { id: String },

    /// Create a policy
    Create(CreatePolicyArgs),

    /// Change fields of a policy
    Update(UpdatePolicyArgs),

    /// Delete a policy no document references
    Delete { id: String },

    /// Copy a policy under a new name
    Clone { id: String, name: String },
}

#[derive(Args, Debug)]
pub struct CreatePolicyArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Years a document is kept, counted from its index date
    #[arg(long, default_value_t = 1)]
    pub years: u32,

    /// review, archive or delete
    #[arg(long, default_value = "review")]
    pub action: RetentionAction,

    /// Days of advance notice before the action is due
    #[arg(long, conflicts_with = "no_notify")]
    pub notify_days: Option<u32>,

    /// Do not send advance notices
    #[arg(long)]
    pub no_notify: bool,
}

impl CreatePolicyArgs {
    #[must_use]
    pub fn into_draft(self) -> PolicyDraft {
        let mut draft = PolicyDraft::new(self.name)
            .with_retention_years(self.years)
            .with_action(self.action);
        if let Some(description) = self.description {
            draft = draft.with_description(description);
        }
        if self.no_notify {
            draft = draft.without_notification();
        } else if let Some(days) = self.notify_days {
            draft = draft.notify_days_before(days);
        }
        draft
    }
}

#[derive(Args, Debug)]
pub struct UpdatePolicyArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    /// New description; an empty string clears it
    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub years: Option<u32>,

    #[arg(long)]
    pub action: Option<RetentionAction>,

    /// Enable advance notices this many days ahead
    #[arg(long, conflicts_with = "no_notify")]
    pub notify_days: Option<u32>,

    /// Disable advance notices
    #[arg(long)]
    pub no_notify: bool,
}

impl UpdatePolicyArgs {
    #[must_use]
    pub fn into_update(self) -> (String, PolicyUpdate) {
        let notify_before_action = if self.no_notify {
            Some(false)
        } else {
            self.notify_days.map(|_| true)
        };
        let update = PolicyUpdate {
            name: self.name,
            description: self.description,
            retention_years: self.years,
            action: self.action,
            notify_before_action,
            notify_days_before: self.notify_days,
        };
        (self.id, update)
    }
}

pub async fn execute(command: PolicyCommand, store: &JsonStore) -> Result<()> {
    match command {
        PolicyCommand::List => print_json(&store.list_policies().await?),
        PolicyCommand::Show { id } => {
            let policy = store
                .get_policy(&id)
                .await?
                .ok_or_else(|| eyre!("Retention policy not found: {id}"))?;
            print_json(&policy)
        }
        PolicyCommand::Create(args) => print_json(&store.create_policy(args.into_draft()).await?),
        PolicyCommand::Update(args) => {
            let (id, update) = args.into_update();
            if update.is_empty() {
                return Err(eyre!("Nothing to update for policy {id}"));
            }
            print_json(&store.update_policy(&id, update).await?)
        }
        PolicyCommand::Delete { id } => {
            store.delete_policy(&id).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        PolicyCommand::Clone { id, name } => print_json(&store.clone_policy(&id, &name).await?),
    }
}
