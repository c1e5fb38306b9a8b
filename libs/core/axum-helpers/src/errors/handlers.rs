use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

/// Handler for 404 Not Found errors.
///
/// Used as the router fallback.
pub async fn not_found() -> Response {
    ErrorResponse::new(StatusCode::NOT_FOUND, ErrorCode::NotFound.default_message())
        .into_response()
}

/// Handler for 405 Method Not Allowed errors.
///
/// Attach with `MethodRouter::fallback` so unsupported verbs get the standard error body.
pub async fn method_not_allowed() -> Response {
    ErrorResponse::new(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::MethodNotAllowed.default_message(),
    )
    .into_response()
}
