use axum::Router;
use domain_users::{AuthenticationService, DataStoreUserRepository, handlers};

use crate::state::AppState;

pub fn authentication_service(state: &AppState) -> AuthenticationService<DataStoreUserRepository> {
    AuthenticationService::new(DataStoreUserRepository::new(state.data_store.clone()))
}

pub fn router(state: &AppState) -> Router {
    handlers::router(authentication_service(state))
}
