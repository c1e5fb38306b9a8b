use async_trait::async_trait;
use database::DataStore;
use std::sync::Arc;

use crate::error::StoreResult;
use crate::models::Store;

/// Repository trait for Store persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Store>>;

    async fn find_all(&self) -> StoreResult<Vec<Store>>;

    /// Insert or replace, keyed by id.
    async fn save(&self, store: Store) -> StoreResult<Store>;

    /// Insert a new store. `None` when the id is already taken.
    async fn create(&self, store: Store) -> StoreResult<Option<Store>>;

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool>;
}

/// [`StoreRepository`] backed by the shared [`DataStore`].
#[derive(Clone)]
pub struct DataStoreStoreRepository {
    store: Arc<dyn DataStore>,
}

impl DataStoreStoreRepository {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StoreRepository for DataStoreStoreRepository {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Store>> {
        Ok(self.store.get_store(id).await?)
    }

    async fn find_all(&self) -> StoreResult<Vec<Store>> {
        Ok(self.store.list_stores().await?)
    }

    async fn save(&self, store: Store) -> StoreResult<Store> {
        Ok(self.store.put_store(store).await?)
    }

    async fn create(&self, store: Store) -> StoreResult<Option<Store>> {
        Ok(self.store.insert_store(store).await?)
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        Ok(self.store.remove_store(id).await?)
    }
}
