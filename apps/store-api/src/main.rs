use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::datastore::PgDataStore;
use database::postgres::{connect_from_config_with_retry, run_migrations};
use database::{DataStore, DataStoreKind, InMemoryDataStore};
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let (data_store, db) = match (config.data_store, &config.database) {
        (DataStoreKind::Postgres, Some(pg_config)) => {
            let db = connect_from_config_with_retry(pg_config.clone(), None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;
            run_migrations::<migration::Migrator>(&db, config.app.name).await?;
            let store: Arc<dyn DataStore> = Arc::new(PgDataStore::new(db.clone()));
            (store, Some(db))
        }
        (DataStoreKind::Postgres, None) => {
            eyre::bail!("DATA_STORE=postgres needs DATABASE_URL");
        }
        (DataStoreKind::Memory, _) => {
            let store: Arc<dyn DataStore> = Arc::new(InMemoryDataStore::new());
            (store, None)
        }
    };
    info!(backend = data_store.backend(), "Data store ready");

    let state = AppState {
        config,
        data_store,
        db,
    };

    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.environment)?;

    // - /health: liveness with app name/version
    // - /ready: data store health check
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!(
        require_auth = state.config.require_auth,
        "Starting {} v{}", state.config.app.name, state.config.app.version
    );

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, async move {
        if let Some(db) = state.db {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Store API shutdown complete");
    Ok(())
}
