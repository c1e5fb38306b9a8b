use axum::Router;
use domain_stores::{DataStoreStoreRepository, StoreService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = DataStoreStoreRepository::new(state.data_store.clone());
    handlers::router(StoreService::new(repository))
}
