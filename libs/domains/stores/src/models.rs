use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub use database::Store;

/// Store as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoreDto {
    #[schema(example = "DEAL-001")]
    pub id: String,
    #[schema(example = "1 Main St")]
    pub address: Option<String>,
    #[schema(example = "Corner shop")]
    pub description: Option<String>,
}

/// Parameters for provisioning a store.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CreateStoreParams {
    /// Required, unique
    #[serde(rename = "storeId")]
    pub store_id: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    /// Older clients send the description as `name`; used when `description` is blank
    pub name: Option<String>,
}

/// Parameters for updating a store. Blank values leave the field unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpdateStoreParams {
    pub description: Option<String>,
    pub address: Option<String>,
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
