use axum::{Router, middleware::from_fn_with_state, routing::get};
use axum_helpers::{SharedVerifier, optional_auth_middleware, require_auth_middleware};
use std::sync::Arc;

use crate::state::AppState;

pub mod health;
pub mod stores;
pub mod users;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Every domain router carries its own state. Requests pass through Basic
/// authentication; store routes reject anonymous callers when `REQUIRE_AUTH`
/// is set.
///
/// Domain routers are mounted with `nest_service`, which also answers the
/// trailing-slash form of the mount point (`/stores/` lists like `/stores`).
pub fn routes(state: &AppState) -> Router {
    let verifier: SharedVerifier = Arc::new(users::authentication_service(state));

    let stores = stores::router(state);
    let stores = if state.config.require_auth {
        stores.layer(from_fn_with_state(verifier.clone(), require_auth_middleware))
    } else {
        stores.layer(from_fn_with_state(verifier.clone(), optional_auth_middleware))
    };

    Router::new()
        .nest_service("/stores", stores)
        .nest_service(
            "/users",
            users::router(state).layer(from_fn_with_state(verifier, optional_auth_middleware)),
        )
}

/// Creates a router with the /ready endpoint that checks the data store.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
