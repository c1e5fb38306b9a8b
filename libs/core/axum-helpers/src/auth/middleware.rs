use super::SharedVerifier;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

/// Authentication middleware for protected routes.
///
/// Rejects the request with 401 unless the verifier accepts the
/// `Authorization` header. Inserts the [`Principal`](super::Principal) into
/// request extensions on success.
pub async fn require_auth_middleware(
    State(verifier): State<SharedVerifier>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    match verifier.verify(authorization_header(&headers)).await {
        Some(principal) => {
            tracing::debug!(subject = %principal.subject, "Request authenticated");
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        None => AppError::Unauthorized("Authentication required".to_string()).into_response(),
    }
}

/// Optional authentication middleware.
///
/// Like [`require_auth_middleware`] but lets anonymous requests through.
/// Handlers read the caller with [`Caller`](super::Caller).
pub async fn optional_auth_middleware(
    State(verifier): State<SharedVerifier>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(principal) = verifier.verify(authorization_header(&headers)).await {
        request.extensions_mut().insert(principal);
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Caller, CredentialVerifier, Principal};
    use async_trait::async_trait;
    use axum::{Router, body::Body, http::StatusCode, routing::get};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct FixedVerifier;

    #[async_trait]
    impl CredentialVerifier for FixedVerifier {
        async fn verify(&self, authorization: Option<&str>) -> Option<Principal> {
            (authorization == Some("Basic good")).then(|| Principal {
                subject: "ada@example.com".to_string(),
                role: "ADMIN".to_string(),
            })
        }
    }

    async fn whoami(Caller(principal): Caller) -> String {
        principal
            .map(|p| p.subject)
            .unwrap_or_else(|| "anonymous".to_string())
    }

    fn app(required: bool) -> Router {
        let verifier: SharedVerifier = Arc::new(FixedVerifier);
        let router = Router::new().route("/", get(whoami));
        if required {
            router.layer(axum::middleware::from_fn_with_state(verifier, require_auth_middleware))
        } else {
            router.layer(axum::middleware::from_fn_with_state(verifier, optional_auth_middleware))
        }
    }

    async fn call(app: Router, authorization: Option<&str>) -> (StatusCode, String) {
        let mut builder = axum::http::Request::builder().uri("/");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_required_rejects_missing_credentials() {
        let (status, body) = call(app(true), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("\"status\":401"));
    }

    #[tokio::test]
    async fn test_required_rejects_bad_credentials() {
        let (status, _) = call(app(true), Some("Basic bad")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_required_passes_principal() {
        let (status, body) = call(app(true), Some("Basic good")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ada@example.com");
    }

    #[tokio::test]
    async fn test_optional_allows_anonymous() {
        assert_eq!(call(app(false), None).await, (StatusCode::OK, "anonymous".to_string()));
        assert_eq!(
            call(app(false), Some("Basic bad")).await,
            (StatusCode::OK, "anonymous".to_string())
        );
        assert_eq!(
            call(app(false), Some("Basic good")).await,
            (StatusCode::OK, "ada@example.com".to_string())
        );
    }
}
