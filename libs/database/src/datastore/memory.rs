use async_trait::async_trait;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{DataStore, Store, User};
use crate::common::DatabaseResult;

/// In-memory implementation of [`DataStore`] (for development/testing)
///
/// Clones share the same maps.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDataStore {
    stores: Arc<RwLock<BTreeMap<String, Store>>>,
    users: Arc<RwLock<BTreeMap<String, User>>>,
}

impl InMemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataStore for InMemoryDataStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> DatabaseResult<()> {
        Ok(())
    }

    async fn get_store(&self, id: &str) -> DatabaseResult<Option<Store>> {
        Ok(self.stores.read().await.get(id).cloned())
    }

    async fn list_stores(&self) -> DatabaseResult<Vec<Store>> {
        Ok(self.stores.read().await.values().cloned().collect())
    }

    async fn put_store(&self, store: Store) -> DatabaseResult<Store> {
        let mut stores = self.stores.write().await;
        stores.insert(store.id.clone(), store.clone());

        tracing::debug!(store_id = %store.id, "Stored store");
        Ok(store)
    }

    async fn insert_store(&self, store: Store) -> DatabaseResult<Option<Store>> {
        match self.stores.write().await.entry(store.id.clone()) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                tracing::debug!(store_id = %store.id, "Inserted store");
                Ok(Some(slot.insert(store).clone()))
            }
        }
    }

    async fn store_exists(&self, id: &str) -> DatabaseResult<bool> {
        Ok(self.stores.read().await.contains_key(id))
    }

    async fn remove_store(&self, id: &str) -> DatabaseResult<bool> {
        let removed = self.stores.write().await.remove(id).is_some();
        if removed {
            tracing::debug!(store_id = %id, "Removed store");
        }
        Ok(removed)
    }

    async fn get_user(&self, email: &str) -> DatabaseResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn list_users(&self) -> DatabaseResult<Vec<User>> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn put_user(&self, user: User) -> DatabaseResult<User> {
        let mut users = self.users.write().await;
        users.insert(user.email.clone(), user.clone());

        tracing::debug!(email = %user.email, "Stored user");
        Ok(user)
    }

    async fn user_exists(&self, email: &str) -> DatabaseResult<bool> {
        Ok(self.users.read().await.contains_key(email))
    }

    async fn remove_user(&self, email: &str) -> DatabaseResult<bool> {
        let removed = self.users.write().await.remove(email).is_some();
        if removed {
            tracing::debug!(email = %email, "Removed user");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastore::UserRole;

    #[tokio::test]
    async fn test_put_and_get_store() {
        let store = InMemoryDataStore::new();
        let saved = store
            .put_store(Store::new("DEAL-001").with_address("1 Main St"))
            .await
            .unwrap();
        assert_eq!(saved.id, "DEAL-001");

        let fetched = store.get_store("DEAL-001").await.unwrap().unwrap();
        assert_eq!(fetched.address.as_deref(), Some("1 Main St"));
        assert!(store.get_store("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_store_replaces() {
        let store = InMemoryDataStore::new();
        store.put_store(Store::new("S-1").with_description("old")).await.unwrap();
        store.put_store(Store::new("S-1").with_description("new")).await.unwrap();

        let stores = store.list_stores().await.unwrap();
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].description.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_insert_store_keeps_existing() {
        let store = InMemoryDataStore::new();
        let first = store
            .insert_store(Store::new("S-1").with_description("first"))
            .await
            .unwrap();
        assert!(first.is_some());

        let second = store
            .insert_store(Store::new("S-1").with_description("second"))
            .await
            .unwrap();
        assert!(second.is_none());

        let kept = store.get_store("S-1").await.unwrap().unwrap();
        assert_eq!(kept.description.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_list_stores_ordered_by_id() {
        let store = InMemoryDataStore::new();
        for id in ["S-3", "S-1", "S-2"] {
            store.put_store(Store::new(id)).await.unwrap();
        }

        let ids: Vec<_> = store
            .list_stores()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, ["S-1", "S-2", "S-3"]);
    }

    #[tokio::test]
    async fn test_remove_store() {
        let store = InMemoryDataStore::new();
        store.put_store(Store::new("S-1")).await.unwrap();

        assert!(store.store_exists("S-1").await.unwrap());
        assert!(store.remove_store("S-1").await.unwrap());
        assert!(!store.remove_store("S-1").await.unwrap());
        assert!(!store.store_exists("S-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_users_keyed_by_email() {
        let store = InMemoryDataStore::new();
        store
            .put_user(User::new("b@example.com", "h1").with_role(UserRole::Admin))
            .await
            .unwrap();
        store.put_user(User::new("a@example.com", "h2")).await.unwrap();

        let users = store.list_users().await.unwrap();
        assert_eq!(users[0].email, "a@example.com");
        assert_eq!(users[1].role, UserRole::Admin);

        assert!(store.user_exists("a@example.com").await.unwrap());
        assert!(store.remove_user("a@example.com").await.unwrap());
        assert!(store.get_user("a@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryDataStore::new();
        let clone = store.clone();
        clone.put_store(Store::new("S-1")).await.unwrap();
        assert!(store.store_exists("S-1").await.unwrap());
        assert!(store.health_check().await.is_ok());
        assert_eq!(store.backend(), "memory");
    }
}
