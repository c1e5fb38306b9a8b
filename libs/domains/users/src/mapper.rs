//! Conversions between [`User`] and its wire form.

use std::str::FromStr;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserDto, UserRole};

/// Outbound mapping. The password never leaves the domain.
pub fn to_dto(user: &User) -> UserDto {
    UserDto {
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role.to_string(),
    }
}

pub fn to_dto_list(users: &[User]) -> Vec<UserDto> {
    users.iter().map(to_dto).collect()
}

/// Rebuilds a user from its DTO and an already-encrypted password.
pub fn to_domain(dto: UserDto, encrypted_password: impl Into<String>) -> UserResult<User> {
    let role = UserRole::from_str(&dto.role).map_err(|_| UserError::InvalidRole(dto.role.clone()))?;

    Ok(User {
        email: dto.email,
        password: encrypted_password.into(),
        name: dto.name,
        role,
    })
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        to_dto(user)
    }
}
