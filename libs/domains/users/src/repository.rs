use async_trait::async_trait;
use database::DataStore;
use std::sync::Arc;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Insert or replace, keyed by email. Returns the stored user.
    async fn save(&self, user: User) -> UserResult<User>;

    async fn exists_by_email(&self, email: &str) -> UserResult<bool>;

    /// `true` if a user was removed.
    async fn delete_by_email(&self, email: &str) -> UserResult<bool>;
}

/// [`UserRepository`] backed by the shared [`DataStore`].
#[derive(Clone)]
pub struct DataStoreUserRepository {
    store: Arc<dyn DataStore>,
}

impl DataStoreUserRepository {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for DataStoreUserRepository {
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self.store.get_user(email).await?)
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        Ok(self.store.list_users().await?)
    }

    async fn save(&self, user: User) -> UserResult<User> {
        Ok(self.store.put_user(user).await?)
    }

    async fn exists_by_email(&self, email: &str) -> UserResult<bool> {
        Ok(self.store.user_exists(email).await?)
    }

    async fn delete_by_email(&self, email: &str) -> UserResult<bool> {
        Ok(self.store.remove_user(email).await?)
    }
}
