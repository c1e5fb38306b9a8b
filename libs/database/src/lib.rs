//! Storage layer for the store and user backend.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `config` - `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! # Examples
//!
//! ```ignore
//! use database::datastore::{DataStore, InMemoryDataStore, Store};
//!
//! let store = InMemoryDataStore::new();
//! store.put_store(Store::new("DEAL-001")).await?;
//! ```
//!
//! ```ignore
//! use database::{datastore::PgDataStore, postgres};
//!
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "store-api").await?;
//! let store = PgDataStore::new(db);
//! ```

pub mod common;
pub mod datastore;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
pub use datastore::{DataStore, DataStoreKind, InMemoryDataStore, Store, User, UserRole};
