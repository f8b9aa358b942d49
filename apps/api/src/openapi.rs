use utoipa::OpenApi;

/// Top-level OpenAPI documentation for the directory API
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "User Directory API",
        version = "0.1.0",
        description = "CRUD API for user records with search, pagination, soft deletion, and restore"
    ),
    nest(
        (path = "/", api = domain_users::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
