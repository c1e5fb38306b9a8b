use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;

/// Store domain failures. Every variant but `Storage` is a client error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store does not exist: {0}")]
    NotFound(String),

    #[error("Store already exists: {0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] DatabaseError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Convert StoreError to AppError for standardized error responses
///
/// Unknown stores answer 400 rather than 404, like every other store rule.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Storage(e) => AppError::Storage(e.to_string()),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
