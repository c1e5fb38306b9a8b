//! Stores Domain
//!
//! Provisioning, lookup, update and removal of stores keyed by a
//! caller-supplied id.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use database::InMemoryDataStore;
//! use domain_stores::{DataStoreStoreRepository, StoreService, handlers};
//!
//! let repository = DataStoreStoreRepository::new(Arc::new(InMemoryDataStore::new()));
//! let router = handlers::router(StoreService::new(repository));
//! ```

pub mod error;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{StoreError, StoreResult};
pub use handlers::ApiDoc;
pub use models::{CreateStoreParams, Store, StoreDto, UpdateStoreParams};
pub use repository::{DataStoreStoreRepository, StoreRepository};
pub use service::StoreService;
