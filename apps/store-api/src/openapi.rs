use utoipa::OpenApi;

/// Combined API documentation served at `/api-docs/openapi.json`
#[derive(OpenApi)]
#[openapi(
    info(title = "Store API", description = "Stores and users over REST"),
    nest(
        (path = "/api/stores", api = domain_stores::ApiDoc),
        (path = "/api/users", api = domain_users::ApiDoc)
    )
)]
pub struct ApiDoc;
