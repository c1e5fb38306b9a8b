//! Request authentication.
//!
//! The HTTP layer only knows about the `Authorization` header and the
//! [`Principal`] it resolves to. Decoding and checking credentials is the job
//! of a [`CredentialVerifier`], implemented by the users domain.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{SharedVerifier, require_auth_middleware};
//!
//! let verifier: SharedVerifier = Arc::new(auth_service);
//! let protected = Router::new()
//!     .route("/api/protected", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(verifier, require_auth_middleware));
//! ```

pub mod middleware;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;

pub use middleware::{optional_auth_middleware, require_auth_middleware};

/// Identity of an authenticated caller, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    /// Stable identifier (the user's email)
    pub subject: String,
    /// Role name as stored, e.g. `ADMIN`
    pub role: String,
}

/// Resolves the raw `Authorization` header value to a principal.
///
/// Returns `None` for anything that is not a valid credential. Verifiers never
/// fail: a broken header and an unknown user look the same to the caller.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, authorization: Option<&str>) -> Option<Principal>;
}

pub type SharedVerifier = Arc<dyn CredentialVerifier>;

/// The principal left in request extensions by the auth middleware, if any.
///
/// Never rejects: routes without auth middleware see `Caller(None)`.
#[derive(Debug, Clone, Default)]
pub struct Caller(pub Option<Principal>);

impl Caller {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller(parts.extensions.get::<Principal>().cloned()))
    }
}
