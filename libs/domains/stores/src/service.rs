use axum_helpers::Principal;
use std::sync::Arc;

use crate::error::{StoreError, StoreResult};
use crate::models::{Store, non_blank};
use crate::repository::StoreRepository;

fn actor(context: Option<&Principal>) -> Option<&str> {
    context.map(|p| p.subject.as_str())
}

/// Service layer for store business logic
pub struct StoreService<R: StoreRepository> {
    repository: Arc<R>,
}

impl<R: StoreRepository> StoreService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn get_all_stores(&self) -> StoreResult<Vec<Store>> {
        self.repository.find_all().await
    }

    /// `context` is the authenticated caller, if any. It is logged, not checked.
    pub async fn show_store(&self, id: &str, context: Option<&Principal>) -> StoreResult<Store> {
        tracing::debug!(store_id = %id, actor = ?actor(context), "Showing store");

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Create a store. Fails if the id is blank or already taken.
    pub async fn provision_store(
        &self,
        id: &str,
        description: Option<&str>,
        address: Option<&str>,
        context: Option<&Principal>,
    ) -> StoreResult<Store> {
        if id.trim().is_empty() {
            return Err(StoreError::Validation("Store id is required".to_string()));
        }
        let store = Store {
            id: id.to_string(),
            address: address.map(str::to_string),
            description: description.map(str::to_string),
        };

        let saved = self
            .repository
            .create(store)
            .await?
            .ok_or_else(|| StoreError::AlreadyExists(id.to_string()))?;
        tracing::info!(store_id = %saved.id, actor = ?actor(context), "Store provisioned");
        Ok(saved)
    }

    /// Replace description and/or address. Blank or absent values are left alone.
    pub async fn update_store(
        &self,
        id: &str,
        description: Option<&str>,
        address: Option<&str>,
    ) -> StoreResult<Store> {
        let mut store = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(description) = non_blank(description) {
            store.description = Some(description.to_string());
        }
        if let Some(address) = non_blank(address) {
            store.address = Some(address.to_string());
        }

        let saved = self.repository.save(store).await?;
        tracing::info!(store_id = %saved.id, "Store updated");
        Ok(saved)
    }

    pub async fn delete_store(&self, id: &str) -> StoreResult<()> {
        if !self.repository.delete_by_id(id).await? {
            return Err(StoreError::NotFound(id.to_string()));
        }

        tracing::info!(store_id = %id, "Store deleted");
        Ok(())
    }
}
