//! Readiness check against the selected data store.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "data_store",
        Box::pin(async {
            state
                .data_store
                .health_check()
                .await
                .map_err(|e| format!("{} store check failed: {}", state.data_store.backend(), e))
        }),
    )];

    run_health_checks(checks).await.into_response()
}
