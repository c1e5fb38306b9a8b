use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{MethodRouter, get},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, Caller, Params, ResourceId,
    errors::{
        handlers::method_not_allowed,
        responses::{BadRequestResponse, InternalServerErrorResponse, UnauthorizedResponse},
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{StoreError, StoreResult};
use crate::mapper::{to_dto, to_dto_list};
use crate::models::{CreateStoreParams, StoreDto, UpdateStoreParams, non_blank};
use crate::repository::StoreRepository;
use crate::service::StoreService;

pub const TAG: &str = "stores";

/// OpenAPI documentation for Stores API
#[derive(OpenApi)]
#[openapi(
    paths(list_stores, get_store, create_store, update_store, delete_store),
    components(
        schemas(StoreDto, CreateStoreParams, UpdateStoreParams),
        responses(BadRequestResponse, UnauthorizedResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Store provisioning and management")
    )
)]
pub struct ApiDoc;

type SharedService<R> = State<Arc<StoreService<R>>>;

/// Create the store router with all HTTP endpoints
pub fn router<R: StoreRepository + 'static>(service: StoreService<R>) -> Router {
    let shared_service = Arc::new(service);

    let writes = |read: MethodRouter<Arc<StoreService<R>>>| {
        read.post(create_store::<R>)
            .put(update_store::<R>)
            .delete(delete_store::<R>)
            .fallback(method_not_allowed)
    };

    Router::new()
        .route("/", writes(get(list_stores::<R>)))
        .route("/{*store_id}", writes(get(get_store::<R>)))
        .with_state(shared_service)
}

fn required_in_path(id: Option<String>) -> StoreResult<String> {
    id.filter(|id| !id.trim().is_empty())
        .ok_or_else(|| StoreError::Validation("storeId is required in the path".to_string()))
}

fn audit_event(action: &str, store_id: &str, caller: &Caller, headers: &HeaderMap) -> AuditEvent {
    AuditEvent::new(action, Some(format!("store:{}", store_id)), AuditOutcome::Success)
        .with_principal(caller.principal())
        .with_ip(extract_ip_from_headers(headers))
        .with_user_agent(extract_user_agent(headers))
}

/// List all stores
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All stores", body = Vec<StoreDto>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_stores<R: StoreRepository>(
    State(service): SharedService<R>,
) -> StoreResult<Json<Vec<StoreDto>>> {
    let stores = service.get_all_stores().await?;
    Ok(Json(to_dto_list(&stores)))
}

/// Get a store by id
#[utoipa::path(
    get,
    path = "/{store_id}",
    tag = TAG,
    params(("store_id" = String, Path, description = "Store id")),
    responses(
        (status = 200, description = "Store found", body = StoreDto),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_store<R: StoreRepository>(
    state: SharedService<R>,
    ResourceId(store_id): ResourceId,
    caller: Caller,
) -> StoreResult<Response> {
    let Some(store_id) = store_id else {
        return list_stores(state).await.map(IntoResponse::into_response);
    };

    let State(service) = state;
    let store = service.show_store(&store_id, caller.principal()).await?;
    Ok(Json(to_dto(&store)).into_response())
}

/// Provision a new store
///
/// `description` falls back to `name` when blank.
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(CreateStoreParams),
    request_body(content = CreateStoreParams, content_type = "application/json"),
    responses(
        (status = 201, description = "Store provisioned", body = StoreDto),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_store<R: StoreRepository>(
    State(service): SharedService<R>,
    caller: Caller,
    headers: HeaderMap,
    Params(input): Params<CreateStoreParams>,
) -> StoreResult<impl IntoResponse> {
    let description = non_blank(input.description.as_deref()).or(input.name.as_deref());

    let Some(store_id) = non_blank(input.store_id.as_deref()) else {
        return Err(StoreError::Validation("storeId is required".to_string()));
    };

    let store = service
        .provision_store(
            store_id,
            description,
            input.address.as_deref(),
            caller.principal(),
        )
        .await?;

    audit_event("store.provision", &store.id, &caller, &headers)
        .with_details(json!({ "address": store.address, "description": store.description }))
        .log();

    Ok((StatusCode::CREATED, Json(to_dto(&store))))
}

/// Update a store's description and/or address
#[utoipa::path(
    put,
    path = "/{store_id}",
    tag = TAG,
    params(("store_id" = String, Path, description = "Store id"), UpdateStoreParams),
    request_body(content = UpdateStoreParams, content_type = "application/json"),
    responses(
        (status = 200, description = "Store updated", body = StoreDto),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_store<R: StoreRepository>(
    State(service): SharedService<R>,
    ResourceId(store_id): ResourceId,
    caller: Caller,
    headers: HeaderMap,
    Params(input): Params<UpdateStoreParams>,
) -> StoreResult<Json<StoreDto>> {
    let store_id = required_in_path(store_id)?;

    let store = service
        .update_store(
            &store_id,
            input.description.as_deref(),
            input.address.as_deref(),
        )
        .await?;

    audit_event("store.update", &store.id, &caller, &headers).log();
    Ok(Json(to_dto(&store)))
}

/// Delete a store
#[utoipa::path(
    delete,
    path = "/{store_id}",
    tag = TAG,
    params(("store_id" = String, Path, description = "Store id")),
    responses(
        (status = 204, description = "Store deleted"),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_store<R: StoreRepository>(
    State(service): SharedService<R>,
    ResourceId(store_id): ResourceId,
    caller: Caller,
    headers: HeaderMap,
) -> StoreResult<StatusCode> {
    let store_id = required_in_path(store_id)?;

    service.delete_store(&store_id).await?;

    audit_event("store.delete", &store_id, &caller, &headers).log();
    Ok(StatusCode::NO_CONTENT)
}
