use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use super::entity::{stores, users};
use super::{DataStore, Store, User};
use crate::common::{DatabaseError, DatabaseResult};
use crate::postgres::check_health;

/// PostgreSQL implementation of [`DataStore`]
///
/// Puts are `INSERT .. ON CONFLICT DO UPDATE` followed by a read-back, so the
/// returned entity is what the database holds.
#[derive(Debug, Clone)]
pub struct PgDataStore {
    db: DatabaseConnection,
}

impl PgDataStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn missing_after_upsert(table: &str, key: &str) -> DatabaseError {
    DatabaseError::Generic(format!("{} row {} missing after upsert", table, key))
}

#[async_trait]
impl DataStore for PgDataStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> DatabaseResult<()> {
        check_health(&self.db).await
    }

    async fn get_store(&self, id: &str) -> DatabaseResult<Option<Store>> {
        let model = stores::Entity::find_by_id(id.to_owned()).one(&self.db).await?;
        Ok(model.map(Store::from))
    }

    async fn list_stores(&self) -> DatabaseResult<Vec<Store>> {
        let models = stores::Entity::find()
            .order_by_asc(stores::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Store::from).collect())
    }

    async fn put_store(&self, store: Store) -> DatabaseResult<Store> {
        let id = store.id.clone();

        stores::Entity::insert(stores::ActiveModel::from(store))
            .on_conflict(
                OnConflict::column(stores::Column::Id)
                    .update_columns([stores::Column::Address, stores::Column::Description])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        tracing::debug!(store_id = %id, "Upserted store");
        self.get_store(&id)
            .await?
            .ok_or_else(|| missing_after_upsert("stores", &id))
    }

    async fn insert_store(&self, store: Store) -> DatabaseResult<Option<Store>> {
        let id = store.id.clone();

        let inserted = stores::Entity::insert(stores::ActiveModel::from(store))
            .on_conflict(
                OnConflict::column(stores::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        if inserted == 0 {
            return Ok(None);
        }

        tracing::debug!(store_id = %id, "Inserted store");
        self.get_store(&id)
            .await?
            .ok_or_else(|| missing_after_upsert("stores", &id))
            .map(Some)
    }

    async fn store_exists(&self, id: &str) -> DatabaseResult<bool> {
        Ok(self.get_store(id).await?.is_some())
    }

    async fn remove_store(&self, id: &str) -> DatabaseResult<bool> {
        let result = stores::Entity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn get_user(&self, email: &str) -> DatabaseResult<Option<User>> {
        users::Entity::find_by_id(email.to_owned())
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn list_users(&self) -> DatabaseResult<Vec<User>> {
        users::Entity::find()
            .order_by_asc(users::Column::Email)
            .all(&self.db)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn put_user(&self, user: User) -> DatabaseResult<User> {
        let email = user.email.clone();

        users::Entity::insert(users::ActiveModel::from(user))
            .on_conflict(
                OnConflict::column(users::Column::Email)
                    .update_columns([
                        users::Column::Password,
                        users::Column::Name,
                        users::Column::Role,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        tracing::debug!(email = %email, "Upserted user");
        self.get_user(&email)
            .await?
            .ok_or_else(|| missing_after_upsert("users", &email))
    }

    async fn user_exists(&self, email: &str) -> DatabaseResult<bool> {
        let model = users::Entity::find_by_id(email.to_owned()).one(&self.db).await?;
        Ok(model.is_some())
    }

    async fn remove_user(&self, email: &str) -> DatabaseResult<bool> {
        let result = users::Entity::delete_by_id(email.to_owned())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
