use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::datastore::Store;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "stores")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Store {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            address: model.address,
            description: model.description,
        }
    }
}

impl From<Store> for ActiveModel {
    fn from(store: Store) -> Self {
        Self {
            id: Set(store.id),
            address: Set(store.address),
            description: Set(store.description),
        }
    }
}
