//! Resource identifier taken from the first path segment.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Returns the first segment of `path`, percent-decoded.
///
/// `""` and `"/"` carry no identifier. Trailing segments are ignored, so
/// `/DEAL-001/extra` yields `DEAL-001`.
///
/// ```rust
/// use axum_helpers::extractors::extract_resource_id;
///
/// assert_eq!(extract_resource_id("/DEAL-001").as_deref(), Some("DEAL-001"));
/// assert_eq!(extract_resource_id("/"), None);
/// ```
pub fn extract_resource_id(path: &str) -> Option<String> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let segment = trimmed.split('/').next().unwrap_or_default();
    if segment.is_empty() {
        return None;
    }

    // Undecodable escapes are kept as sent.
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    Some(decoded)
}

/// Extractor for the optional resource identifier of a nested resource router.
///
/// Inside `Router::nest("/stores", ..)` the request path is relative to the
/// mount point, so `/api/stores/DEAL-001` gives `Some("DEAL-001")` and
/// `/api/stores` gives `None`.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ResourceId;
///
/// async fn show(ResourceId(id): ResourceId) -> String {
///     id.unwrap_or_else(|| "collection".to_string())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId(pub Option<String>);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ResourceId(extract_resource_id(parts.uri.path())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn test_first_segment() {
        assert_eq!(extract_resource_id("/DEAL-001").as_deref(), Some("DEAL-001"));
        assert_eq!(extract_resource_id("/DEAL-001/items").as_deref(), Some("DEAL-001"));
        assert_eq!(extract_resource_id("DEAL-001").as_deref(), Some("DEAL-001"));
    }

    #[test]
    fn test_root_and_empty_have_no_id() {
        assert_eq!(extract_resource_id(""), None);
        assert_eq!(extract_resource_id("/"), None);
        assert_eq!(extract_resource_id("//x"), None);
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(
            extract_resource_id("/ada%40example.com").as_deref(),
            Some("ada@example.com")
        );
        assert_eq!(extract_resource_id("/a%20b").as_deref(), Some("a b"));
        assert_eq!(extract_resource_id("/%FF").as_deref(), Some("%FF"));
    }

    #[tokio::test]
    async fn test_extractor_reads_uri_path() {
        let (mut parts, _) = Request::builder()
            .uri("/S-1?storeId=ignored")
            .body(())
            .unwrap()
            .into_parts();

        let ResourceId(id) = ResourceId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(id.as_deref(), Some("S-1"));
    }
}
