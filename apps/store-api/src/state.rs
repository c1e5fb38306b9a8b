//! Application state management.

use database::DataStore;
use database::postgres::DatabaseConnection;
use std::sync::Arc;

/// Shared application state, cloned into the readiness router.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// The selected data store; repositories wrap clones of this
    pub data_store: Arc<dyn DataStore>,
    /// Pool behind the postgres store, kept to close it on shutdown
    pub db: Option<DatabaseConnection>,
}
