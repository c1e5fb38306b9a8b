//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "status": 500,
        "message": "An internal server error occurred",
        "timestamp": 1718000000000i64
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - missing parameter or domain rule violated",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "message": "storeId is required",
        "timestamp": 1718000000000i64
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "status": 404,
        "message": "User not found: ada@example.com",
        "timestamp": 1718000000000i64
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - valid Basic credentials required",
    content_type = "application/json",
    example = json!({
        "status": 401,
        "message": "Authentication required",
        "timestamp": 1718000000000i64
    })
)]
pub struct UnauthorizedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({
        "status": 409,
        "message": "User already exists: ada@example.com",
        "timestamp": 1718000000000i64
    })
)]
pub struct ConflictResponse(pub ErrorResponse);
