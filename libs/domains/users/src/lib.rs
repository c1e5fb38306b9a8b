//! Users Domain
//!
//! User registration and management, plus HTTP Basic authentication for the
//! rest of the API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, parameter checks, audit events
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← AuthenticationService: Basic auth, password encryption
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← UserRepository over the shared DataStore
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, UserRole, UserDto, request parameters
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use database::InMemoryDataStore;
//! use domain_users::{AuthenticationService, DataStoreUserRepository, handlers};
//!
//! let repository = DataStoreUserRepository::new(Arc::new(InMemoryDataStore::new()));
//! let service = AuthenticationService::new(repository);
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{CreateUserParams, UpdateUserParams, User, UserDto, UserRole};
pub use password::{Argon2PasswordEncryptor, PasswordEncryptor};
pub use repository::{DataStoreUserRepository, UserRepository};
pub use service::AuthenticationService;
