use core_config::{AppInfo, FromEnv, app_info, env_flag, env_parse, server::ServerConfig};
use database::DataStoreKind;
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    /// `DATA_STORE`: `memory` (default) or `postgres`
    pub data_store: DataStoreKind,
    /// Only read when `data_store` is postgres; `DATABASE_URL` is then required
    pub database: Option<PostgresConfig>,
    /// `REQUIRE_AUTH`: reject anonymous store requests with 401
    pub require_auth: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let data_store = env_parse("DATA_STORE", DataStoreKind::default())?;

        let database = match data_store {
            DataStoreKind::Postgres => Some(PostgresConfig::from_env()?),
            DataStoreKind::Memory => None,
        };

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            data_store,
            database,
            require_auth: env_flag("REQUIRE_AUTH", false)?,
        })
    }
}
