//! Key-addressed storage for stores and users.
//!
//! [`DataStore`] is the only owner of persisted state. Repositories in the
//! domain crates are thin façades over it. Two backends exist:
//!
//! - [`InMemoryDataStore`]: ordered maps behind a lock, for development and tests
//! - [`PgDataStore`] (feature `postgres`): SeaORM over PostgreSQL
//!
//! Each call is atomic for the entity it touches. There are no transactions
//! spanning several calls.

pub mod memory;
pub mod models;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
pub mod postgres;

use async_trait::async_trait;
use strum::{Display, EnumString};

use crate::common::DatabaseResult;

pub use memory::InMemoryDataStore;
pub use models::{Store, User, UserRole};
#[cfg(feature = "postgres")]
pub use postgres::PgDataStore;

#[async_trait]
pub trait DataStore: Send + Sync {
    /// Backend name for logs and readiness output
    fn backend(&self) -> &'static str;

    async fn health_check(&self) -> DatabaseResult<()>;

    async fn get_store(&self, id: &str) -> DatabaseResult<Option<Store>>;

    /// All stores ordered by id
    async fn list_stores(&self) -> DatabaseResult<Vec<Store>>;

    /// Insert or replace; returns the row as stored
    async fn put_store(&self, store: Store) -> DatabaseResult<Store>;

    /// Insert only if the id is free. `None` when a store already holds it.
    async fn insert_store(&self, store: Store) -> DatabaseResult<Option<Store>>;

    async fn store_exists(&self, id: &str) -> DatabaseResult<bool>;

    /// `true` when a row was removed
    async fn remove_store(&self, id: &str) -> DatabaseResult<bool>;

    async fn get_user(&self, email: &str) -> DatabaseResult<Option<User>>;

    /// All users ordered by email
    async fn list_users(&self) -> DatabaseResult<Vec<User>>;

    /// Insert or replace; returns the row as stored
    async fn put_user(&self, user: User) -> DatabaseResult<User>;

    async fn user_exists(&self, email: &str) -> DatabaseResult<bool>;

    /// `true` when a row was removed
    async fn remove_user(&self, email: &str) -> DatabaseResult<bool>;
}

/// Which backend to build at startup (`DATA_STORE`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DataStoreKind {
    #[default]
    Memory,
    Postgres,
}
