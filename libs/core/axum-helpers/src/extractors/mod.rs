//! Custom extractors for Axum handlers.
//!
//! Resource routes share one handler per verb for the collection and the
//! single-resource path, so the identifier is read from the request path by
//! [`ResourceId`] instead of a typed `Path`. Request parameters may arrive in
//! the query string or the body; [`Params`] merges them.

pub mod params;
pub mod resource_id;

pub use params::Params;
pub use resource_id::{ResourceId, extract_resource_id};
