//! Request parameters merged from the query string and the request body.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{Form, FromRequest, Query, Request},
    http::{HeaderMap, Method, header},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Parameters deserialized from the query string, a form-urlencoded body or a
/// JSON object body.
///
/// Body values override query values. Scalar JSON values (numbers, booleans)
/// are read as strings so the target type sees the same shape whatever the
/// encoding. JSON `null` counts as absent.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::Params;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct CreateStore {
///     #[serde(rename = "storeId")]
///     store_id: Option<String>,
/// }
///
/// async fn create(Params(input): Params<CreateStore>) { /* ... */ }
/// ```
#[derive(Debug, Clone)]
pub struct Params<T>(pub T);

#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return BodyKind::Other;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

/// First occurrence of a repeated key wins.
fn collect_pairs(pairs: Vec<(String, String)>) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in pairs {
        map.entry(key).or_insert(Value::String(value));
    }
    map
}

fn flatten_json(object: Map<String, Value>) -> Result<Map<String, Value>, AppError> {
    let mut map = Map::new();
    for (key, value) in object {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => Value::String(s),
            Value::Number(n) => Value::String(n.to_string()),
            Value::Bool(b) => Value::String(b.to_string()),
            Value::Array(_) | Value::Object(_) => {
                return Err(AppError::BadRequest(format!(
                    "Parameter '{}' must be a string",
                    key
                )));
            }
        };
        map.insert(key, value);
    }
    Ok(map)
}

impl<T, S> FromRequest<S> for Params<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query_pairs) = Query::<Vec<(String, String)>>::try_from_uri(req.uri())
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let mut params = collect_pairs(query_pairs);

        let body_params = match body_kind(req.headers()) {
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;

                if bytes.iter().all(u8::is_ascii_whitespace) {
                    Map::new()
                } else {
                    match serde_json::from_slice::<Value>(&bytes) {
                        Ok(Value::Object(object)) => flatten_json(object)?,
                        Ok(_) => {
                            return Err(AppError::BadRequest(
                                "Request body must be a JSON object".to_string(),
                            ));
                        }
                        Err(e) => {
                            return Err(AppError::BadRequest(format!(
                                "Malformed JSON body: {}",
                                e
                            )));
                        }
                    }
                }
            }
            // Form on GET/HEAD reads the query string, which is already merged.
            BodyKind::Form if req.method() != Method::GET && req.method() != Method::HEAD => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                collect_pairs(pairs)
            }
            _ => Map::new(),
        };

        params.extend(body_params);

        serde_json::from_value(Value::Object(params))
            .map(Params)
            .map_err(|e| AppError::BadRequest(format!("Invalid request parameters: {}", e)))
    }
}
