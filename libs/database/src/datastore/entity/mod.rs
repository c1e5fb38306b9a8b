//! SeaORM entities backing [`PgDataStore`](super::PgDataStore).

pub mod stores;
pub mod users;
