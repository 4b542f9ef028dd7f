use super::json::JsonStore;
use super::types::{RetentionRegistry, TransitionRecord};
use super::{DocumentStore, StoreError};
use crate::document::{Document, DocumentStatus, NewDocument};
use crate::retention::calculate_expiry;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

/// Resolve the cached expiry for a document pointing at `policy_id`.
fn expiry_for(
    registry: &RetentionRegistry,
    document_id: &str,
    index_date: DateTime<Utc>,
    policy_id: &str,
) -> Result<DateTime<Utc>, StoreError> {
    let policy = registry
        .policies
        .get(policy_id)
        .ok_or_else(|| StoreError::PolicyNotFound(policy_id.to_string()))?;
    calculate_expiry(index_date, policy.retention_years)
        .ok_or_else(|| StoreError::ExpiryOutOfRange(document_id.to_string()))
}

fn sorted(mut documents: Vec<Document>) -> Vec<Document> {
    documents.sort_by(|a, b| a.index_date.cmp(&b.index_date).then_with(|| a.id.cmp(&b.id)));
    documents
}

impl JsonStore {
    /// Register a document. When a policy is given it must exist, and the
    /// expiry date is computed from it.
    pub async fn register_document(&self, new: NewDocument) -> Result<Document, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        let document = self
            .mutate(|registry| {
                let retention_expiry_date = match &new.retention_policy_id {
                    Some(policy_id) => Some(expiry_for(registry, &id, new.index_date, policy_id)?),
                    None => None,
                };
                let now = Utc::now();
                let document = Document {
                    id: id.clone(),
                    title: new.title,
                    tags: new.tags,
                    index_date: new.index_date,
                    retention_policy_id: new.retention_policy_id,
                    retention_expiry_date,
                    status: new.status,
                    last_notified_on: None,
                    created_at: now,
                    updated_at: now,
                };
                registry.documents.insert(id.clone(), document.clone());
                Ok(document)
            })
            .await?;
        info!(document_id = %document.id, "Registered document");
        Ok(document)
    }

    pub async fn get_document(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let registry = self.read().await?;
        Ok(registry.documents.get(id).cloned())
    }

    /// Every document, oldest index date first.
    pub async fn list_documents(&self) -> Result<Vec<Document>, StoreError> {
        let registry = self.read().await?;
        Ok(sorted(registry.documents.into_values().collect()))
    }

    /// Attach a policy to a document (or detach with `None`), keeping the
    /// cached expiry date in step.
    pub async fn assign_policy(
        &self,
        id: &str,
        policy_id: Option<&str>,
    ) -> Result<Document, StoreError> {
        let document = self
            .mutate(|registry| {
                let index_date = registry
                    .documents
                    .get(id)
                    .map(|d| d.index_date)
                    .ok_or_else(|| StoreError::DocumentNotFound(id.to_string()))?;
                let expiry = match policy_id {
                    Some(pid) => Some(expiry_for(registry, id, index_date, pid)?),
                    None => None,
                };
                let doc = registry
                    .documents
                    .get_mut(id)
                    .ok_or_else(|| StoreError::DocumentNotFound(id.to_string()))?;
                doc.retention_policy_id = policy_id.map(String::from);
                doc.retention_expiry_date = expiry;
                doc.last_notified_on = None;
                doc.updated_at = Utc::now();
                Ok(doc.clone())
            })
            .await?;
        info!(
            document_id = %id,
            policy_id = policy_id.unwrap_or("-"),
            "Assigned retention policy"
        );
        Ok(document)
    }
}

#[async_trait]
impl DocumentStore for JsonStore {
    async fn list_active_with_policy(&self) -> Result<Vec<Document>, StoreError> {
        let registry = self.read().await?;
        let documents = registry
            .documents
            .into_values()
            .filter(|d| d.status == DocumentStatus::Active && d.has_policy())
            .collect();
        Ok(sorted(documents))
    }

    async fn update_status(&self, change: &TransitionRecord) -> Result<(), StoreError> {
        let id = change.document_id.as_str();
        self.mutate(|registry| {
            let doc = registry
                .documents
                .get_mut(id)
                .ok_or_else(|| StoreError::DocumentNotFound(id.to_string()))?;
            if doc.status != change.from
                || doc.retention_policy_id.as_deref() != Some(change.policy_id.as_str())
            {
                return Err(StoreError::DocumentChanged(id.to_string()));
            }
            doc.status = change.to;
            doc.updated_at = change.at;
            Ok(())
        })
        .await?;
        debug!(document_id = %id, status = %change.to, "Updated document status");
        Ok(())
    }

    async fn mark_notified(&self, id: &str, date: NaiveDate) -> Result<(), StoreError> {
        self.mutate(|registry| {
            let doc = registry
                .documents
                .get_mut(id)
                .ok_or_else(|| StoreError::DocumentNotFound(id.to_string()))?;
            doc.last_notified_on = Some(date);
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
#[path = "documents_tests.rs"]
mod tests;
