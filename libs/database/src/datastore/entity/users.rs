use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use std::str::FromStr;

use crate::common::DatabaseError;
use crate::datastore::{User, UserRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub email: String,
    #[sea_orm(column_type = "Text")]
    pub password: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub name: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for User {
    type Error = DatabaseError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let role = UserRole::from_str(&model.role).map_err(|_| {
            DatabaseError::CorruptRecord(format!(
                "users.role '{}' for {} is not a known role",
                model.role, model.email
            ))
        })?;

        Ok(Self {
            email: model.email,
            password: model.password,
            name: model.name,
            role,
        })
    }
}

impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        Self {
            email: Set(user.email),
            password: Set(user.password),
            name: Set(user.name),
            role: Set(user.role.to_string()),
        }
    }
}
