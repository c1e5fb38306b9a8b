use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// Missing or blank input; the message is shown to the client as is.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Storage(#[from] DatabaseError),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound(err.to_string()),
            UserError::AlreadyExists(_) => AppError::Conflict(err.to_string()),
            UserError::InvalidArgument(msg) => AppError::BadRequest(msg),
            UserError::InvalidRole(_) => AppError::BadRequest(err.to_string()),
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
            UserError::Storage(e) => AppError::Storage(e.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
