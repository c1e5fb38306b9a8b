use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{MethodRouter, get},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, Caller, Params, Principal, ResourceId,
    errors::{
        handlers::method_not_allowed,
        responses::{
            BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
        },
    },
    extract_ip_from_headers, extract_user_agent,
};
use std::str::FromStr;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::mapper::{to_dto, to_dto_list};
use crate::models::{CreateUserParams, UpdateUserParams, UserDto, UserRole, non_blank};
use crate::repository::UserRepository;
use crate::service::AuthenticationService;

pub const TAG: &str = "users";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, get_user, create_user, update_user, delete_user),
    components(
        schemas(UserDto, CreateUserParams, UpdateUserParams),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User registration and management")
    )
)]
pub struct ApiDoc;

type SharedService<R> = State<Arc<AuthenticationService<R>>>;

/// Create the users router.
///
/// The collection and the single-user path share the POST, PUT and DELETE
/// handlers; the email is read from the first path segment.
pub fn router<R: UserRepository + 'static>(service: AuthenticationService<R>) -> Router {
    let shared_service = Arc::new(service);

    let writes = |read: MethodRouter<Arc<AuthenticationService<R>>>| {
        read.post(create_user::<R>)
            .put(update_user::<R>)
            .delete(delete_user::<R>)
            .fallback(method_not_allowed)
    };

    Router::new()
        .route("/", writes(get(list_users::<R>)))
        .route("/{*email}", writes(get(get_user::<R>)))
        .with_state(shared_service)
}

fn audit(
    action: &str,
    email: &str,
    outcome: AuditOutcome,
    principal: Option<&Principal>,
    headers: &HeaderMap,
) {
    AuditEvent::new(action, Some(format!("user:{}", email)), outcome)
        .with_principal(principal)
        .with_ip(extract_ip_from_headers(headers))
        .with_user_agent(extract_user_agent(headers))
        .log();
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All users, without credentials", body = Vec<UserDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): SharedService<R>,
) -> UserResult<Json<Vec<UserDto>>> {
    let users = service.get_all_users().await?;
    Ok(Json(to_dto_list(&users)))
}

/// Get a user by email
#[utoipa::path(
    get,
    path = "/{email}",
    tag = TAG,
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    state: SharedService<R>,
    ResourceId(email): ResourceId,
) -> UserResult<axum::response::Response> {
    // `/users//x` has an empty first segment: treat it as the collection.
    let Some(email) = email else {
        return list_users(state).await.map(IntoResponse::into_response);
    };

    let State(service) = state;
    let user = service
        .get_user_by_email(&email)
        .await?
        .ok_or(UserError::NotFound(email))?;

    Ok(Json(to_dto(&user)).into_response())
}

/// Register a new user
///
/// Parameters may be sent in the query string, as a form or as a JSON object.
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(CreateUserParams),
    request_body(content = CreateUserParams, content_type = "application/json"),
    responses(
        (status = 201, description = "User registered", body = UserDto),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): SharedService<R>,
    caller: Caller,
    headers: HeaderMap,
    Params(input): Params<CreateUserParams>,
) -> UserResult<impl IntoResponse> {
    let (Some(email), Some(password)) = (
        non_blank(input.email.as_deref()),
        non_blank(input.password.as_deref()),
    ) else {
        return Err(UserError::InvalidArgument(
            "email and password are required".to_string(),
        ));
    };

    if service.user_exists(email).await? {
        audit("user.register", email, AuditOutcome::Failure, caller.principal(), &headers);
        return Err(UserError::AlreadyExists(email.to_string()));
    }

    let role = non_blank(input.role.as_deref())
        .map(|raw| UserRole::from_str(raw).map_err(|_| UserError::InvalidRole(raw.to_string())))
        .transpose()?;

    let user = service
        .register_user(email, password, input.name.as_deref(), role)
        .await?;

    audit("user.register", &user.email, AuditOutcome::Success, caller.principal(), &headers);
    Ok((StatusCode::CREATED, Json(to_dto(&user))))
}

/// Update a user's password and/or name
#[utoipa::path(
    put,
    path = "/{email}",
    tag = TAG,
    params(("email" = String, Path, description = "User email"), UpdateUserParams),
    request_body(content = UpdateUserParams, content_type = "application/json"),
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): SharedService<R>,
    ResourceId(email): ResourceId,
    caller: Caller,
    headers: HeaderMap,
    Params(input): Params<UpdateUserParams>,
) -> UserResult<Json<UserDto>> {
    let Some(email) = email.filter(|e| !e.trim().is_empty()) else {
        return Err(UserError::InvalidArgument(
            "email is required in the path".to_string(),
        ));
    };

    let password = non_blank(input.password.as_deref());
    let name = non_blank(input.name.as_deref());
    if password.is_none() && name.is_none() {
        return Err(UserError::InvalidArgument("Nothing to update".to_string()));
    }

    let updated = service
        .update_user(&email, password, name)
        .await?
        .ok_or(UserError::NotFound(email))?;

    audit("user.update", &updated.email, AuditOutcome::Success, caller.principal(), &headers);
    Ok(Json(to_dto(&updated)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{email}",
    tag = TAG,
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): SharedService<R>,
    ResourceId(email): ResourceId,
    caller: Caller,
    headers: HeaderMap,
) -> UserResult<StatusCode> {
    let Some(email) = email.filter(|e| !e.trim().is_empty()) else {
        return Err(UserError::InvalidArgument(
            "email is required in the path".to_string(),
        ));
    };

    if !service.delete_user(&email).await? {
        return Err(UserError::NotFound(email));
    }

    audit("user.delete", &email, AuditOutcome::Success, caller.principal(), &headers);
    Ok(StatusCode::NO_CONTENT)
}
