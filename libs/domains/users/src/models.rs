use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub use database::{User, UserRole};

/// User as exposed over the API. There is no password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    /// Email address, unique per user
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Display name
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    /// One of `ADMIN`, `MANAGER`, `USER`
    #[schema(example = "USER")]
    pub role: String,
}

/// Parameters for registering a user.
///
/// Read from the query string, a form body or a JSON body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CreateUserParams {
    /// Required
    pub email: Option<String>,
    /// Required, stored encrypted
    pub password: Option<String>,
    pub name: Option<String>,
    /// Case-insensitive role name, defaults to `USER`
    pub role: Option<String>,
}

/// Parameters for updating a user. At least one must be non-blank.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpdateUserParams {
    pub password: Option<String>,
    pub name: Option<String>,
}

/// `Some` only for values that are present and not blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
