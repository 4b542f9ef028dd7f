use super::json::JsonStore;
use super::{PolicyStore, StoreError};
use crate::retention::{calculate_expiry, PolicyDraft, PolicyUpdate, RetentionPolicy};
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

#[async_trait]
impl PolicyStore for JsonStore {
    async fn get_policy(&self, id: &str) -> Result<Option<RetentionPolicy>, StoreError> {
        let registry = self.read().await?;
        Ok(registry.policies.get(id).cloned())
    }

    async fn list_policies(&self) -> Result<Vec<RetentionPolicy>, StoreError> {
        let registry = self.read().await?;
        let mut policies: Vec<RetentionPolicy> = registry.policies.into_values().collect();
        policies.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(policies)
    }

    async fn create_policy(&self, draft: PolicyDraft) -> Result<RetentionPolicy, StoreError> {
        draft.validate()?;
        let policy = draft.into_policy(uuid::Uuid::new_v4().to_string(), Utc::now());
        let created = self
            .mutate(|registry| {
                registry.policies.insert(policy.id.clone(), policy.clone());
                Ok(policy)
            })
            .await?;
        info!(policy_id = %created.id, name = %created.name, "Created retention policy");
        Ok(created)
    }

    async fn update_policy(
        &self,
        id: &str,
        update: PolicyUpdate,
    ) -> Result<RetentionPolicy, StoreError> {
        let (updated, recomputed) = self
            .mutate(|registry| {
                let policy = registry
                    .policies
                    .get_mut(id)
                    .ok_or_else(|| StoreError::PolicyNotFound(id.to_string()))?;
                let previous_years = policy.retention_years;
                update.apply(policy, Utc::now());
                policy.validate()?;
                let updated = policy.clone();

                let mut recomputed = 0_usize;
                if updated.retention_years != previous_years {
                    for doc in registry
                        .documents
                        .values_mut()
                        .filter(|d| d.retention_policy_id.as_deref() == Some(id))
                    {
                        let expiry = calculate_expiry(doc.index_date, updated.retention_years)
                            .ok_or_else(|| StoreError::ExpiryOutOfRange(doc.id.clone()))?;
                        doc.retention_expiry_date = Some(expiry);
                        recomputed = recomputed.saturating_add(1);
                    }
                }
                Ok((updated, recomputed))
            })
            .await?;
        info!(
            policy_id = %updated.id,
            recomputed_documents = recomputed,
            "Updated retention policy"
        );
        Ok(updated)
    }

    async fn delete_policy(&self, id: &str) -> Result<(), StoreError> {
        self.mutate(|registry| {
            if !registry.policies.contains_key(id) {
                return Err(StoreError::PolicyNotFound(id.to_string()));
            }
            let documents = registry.policy_reference_count(id);
            if documents > 0 {
                return Err(StoreError::PolicyInUse {
                    id: id.to_string(),
                    documents,
                });
            }
            registry.policies.remove(id);
            Ok(())
        })
        .await?;
        info!(policy_id = %id, "Deleted retention policy");
        Ok(())
    }

    async fn clone_policy(&self, id: &str, new_name: &str) -> Result<RetentionPolicy, StoreError> {
        let cloned = self
            .mutate(|registry| {
                let source = registry
                    .policies
                    .get(id)
                    .ok_or_else(|| StoreError::PolicyNotFound(id.to_string()))?;
                let now = Utc::now();
                let copy = RetentionPolicy {
                    id: uuid::Uuid::new_v4().to_string(),
                    name: new_name.to_string(),
                    created_at: now,
                    updated_at: now,
                    ..source.clone()
                };
                copy.validate()?;
                registry.policies.insert(copy.id.clone(), copy.clone());
                Ok(copy)
            })
            .await?;
        info!(source_id = %id, policy_id = %cloned.id, "Cloned retention policy");
        Ok(cloned)
    }
}

#[cfg(test)]
#[path = "policies_tests.rs"]
mod tests;
