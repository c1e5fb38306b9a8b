//! Handler tests for Users domain
//!
//! These drive the users router directly over the in-memory data store:
//! - Parameters from query string, form and JSON bodies
//! - Status codes and the `{status, message, timestamp}` error body
//! - Validation order on registration

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use database::InMemoryDataStore;
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app_with_store() -> (Router, InMemoryDataStore) {
    let store = InMemoryDataStore::new();
    let repository = DataStoreUserRepository::new(Arc::new(store.clone()));
    let app = handlers::router(AuthenticationService::new(repository));
    (app, store)
}

fn app() -> Router {
    app_with_store().0
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn register(app: &Router, email: &str) {
    let response = app
        .clone()
        .oneshot(post_json("/", json!({"email": email, "password": "pw"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_user_returns_201_without_password() {
    let (app, store) = app_with_store();

    let response = app
        .oneshot(post_json(
            "/",
            json!({"email": "ada@example.com", "password": "pw", "name": "Ada", "role": "admin"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({"email": "ada@example.com", "name": "Ada", "role": "ADMIN"}));

    use database::DataStore;
    let stored = store.get_user("ada@example.com").await.unwrap().unwrap();
    assert_ne!(stored.password, "pw");
}

#[tokio::test]
async fn test_create_user_from_query_string() {
    let response = app()
        .oneshot(empty("POST", "/?email=grace%40example.com&password=pw"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let dto: UserDto = json_body(response.into_body()).await;
    assert_eq!(dto.email, "grace@example.com");
    assert_eq!(dto.name, None);
    assert_eq!(dto.role, "USER");
}

#[tokio::test]
async fn test_create_user_from_form() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("email=linus%40example.com&password=pw&role=Manager"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let dto: UserDto = json_body(response.into_body()).await;
    assert_eq!(dto.role, "MANAGER");
}

#[tokio::test]
async fn test_create_user_requires_email_and_password() {
    let response = app()
        .oneshot(post_json("/", json!({"email": "ada@example.com", "password": " "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "email and password are required");
    assert!(body["timestamp"].is_i64());
}

#[tokio::test]
async fn test_duplicate_user_is_409() {
    let app = app();
    register(&app, "ada@example.com").await;

    let response = app
        .oneshot(post_json("/", json!({"email": "ada@example.com", "password": "other"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "User already exists: ada@example.com");
}

#[tokio::test]
async fn test_conflict_is_checked_before_role() {
    let app = app();
    register(&app, "ada@example.com").await;

    let response = app
        .oneshot(post_json(
            "/",
            json!({"email": "ada@example.com", "password": "pw", "role": "root"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_role_is_400() {
    let response = app()
        .oneshot(post_json(
            "/",
            json!({"email": "ada@example.com", "password": "pw", "role": "root"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Invalid role: root");
}

#[tokio::test]
async fn test_list_and_get_users() {
    let app = app();
    register(&app, "b@example.com").await;
    register(&app, "a@example.com").await;

    let response = app.clone().oneshot(empty("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let users: Vec<UserDto> = json_body(response.into_body()).await;
    let emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, ["a@example.com", "b@example.com"]);

    let response = app.oneshot(empty("GET", "/a%40example.com")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let user: Value = json_body(response.into_body()).await;
    assert_eq!(user["email"], "a@example.com");
    assert!(user.get("password").is_none());
}

#[tokio::test]
async fn test_get_unknown_user_is_404() {
    let response = app().oneshot(empty("GET", "/ghost@example.com")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "User not found: ghost@example.com");
}

#[tokio::test]
async fn test_update_user() {
    let app = app();
    register(&app, "ada@example.com").await;

    let response = app
        .oneshot(empty("PUT", "/ada@example.com?name=Ada%20King"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let dto: UserDto = json_body(response.into_body()).await;
    assert_eq!(dto.name.as_deref(), Some("Ada King"));
}

#[tokio::test]
async fn test_update_errors() {
    let app = app();
    register(&app, "ada@example.com").await;

    let cases = [
        ("/?name=x", StatusCode::BAD_REQUEST, "email is required in the path"),
        ("/ada@example.com", StatusCode::BAD_REQUEST, "Nothing to update"),
        ("/ada@example.com?name=%20", StatusCode::BAD_REQUEST, "Nothing to update"),
        ("/ghost@example.com?name=x", StatusCode::NOT_FOUND, "User not found: ghost@example.com"),
    ];

    for (uri, status, message) in cases {
        let response = app.clone().oneshot(empty("PUT", uri)).await.unwrap();
        assert_eq!(response.status(), status, "{}", uri);
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["message"], message, "{}", uri);
    }
}

#[tokio::test]
async fn test_delete_user() {
    let app = app();
    register(&app, "ada@example.com").await;

    let response = app
        .clone()
        .oneshot(empty("DELETE", "/ada@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.into_body().collect().await.unwrap().to_bytes().is_empty());

    let response = app
        .clone()
        .oneshot(empty("DELETE", "/ada@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(empty("GET", "/ada@example.com")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_without_email_is_400() {
    let response = app().oneshot(empty("DELETE", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsupported_method_is_405() {
    let response = app().oneshot(empty("PATCH", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], 405);
}

#[tokio::test]
async fn test_mounted_collection_with_trailing_slash() {
    let app = Router::new().nest_service("/api/users", app());

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/users/",
            json!({"email": "ada@example.com", "password": "pw"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    for uri in ["/api/users", "/api/users/"] {
        let response = app.clone().oneshot(empty("GET", uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
        let users: Vec<UserDto> = json_body(response.into_body()).await;
        assert_eq!(users.len(), 1);
    }

    let response = app
        .oneshot(empty("GET", "/api/users/ada%40example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
