use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post, put},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, InternalServerErrorResponse, NotFoundResponse,
        UnprocessableEntityResponse,
    },
    UuidPath, ValidatedJson,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::UserResult;
use crate::models::{
    CreateUser, ListUsers, PageMeta, PaginationMeta, UpdateUser, User, UserIdRequest, UserListItem,
    UserPage,
};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(index, store, edit, update, destroy, restore),
    components(
        schemas(
            User,
            CreateUser,
            UpdateUser,
            ListUsers,
            UserIdRequest,
            UserListItem,
            UserPage,
            PageMeta,
            PaginationMeta,
            UserPageEnvelope,
            UserEnvelope,
            AckEnvelope
        ),
        responses(
            NotFoundResponse,
            UnprocessableEntityResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/Index", post(index))
        .route("/Store", post(store))
        .route("/Edit/{id}", post(edit))
        .route("/Update/{id}", put(update))
        .route("/Delete", delete(destroy))
        .route("/Restore", put(restore))
        .with_state(shared_service)
}

/// Success envelope around a page of users
#[derive(Debug, Serialize, ToSchema)]
struct UserPageEnvelope {
    data: UserPage,
    message: String,
}

/// Success envelope around a single user
#[derive(Debug, Serialize, ToSchema)]
struct UserEnvelope {
    data: User,
    message: String,
}

/// Success envelope for delete/restore acknowledgements
#[derive(Debug, Serialize, ToSchema)]
struct AckEnvelope {
    data: bool,
    message: String,
}

/// List users with search, sort, and pagination
///
/// Soft-deleted users are included in the listing.
#[utoipa::path(
    post,
    path = "/Users/Index",
    tag = TAG,
    request_body = ListUsers,
    responses(
        (status = 200, description = "One page of users with pagination metadata", body = UserPageEnvelope),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn index<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(request): ValidatedJson<ListUsers>,
) -> UserResult<Json<UserPageEnvelope>> {
    let page = service.list_users(request).await?;

    Ok(Json(UserPageEnvelope {
        data: page,
        message: "Success".to_string(),
    }))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/Users/Store",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created successfully", body = UserEnvelope),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn store<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            data: user,
            message: "The user was registered successfully.".to_string(),
        }),
    ))
}

/// Get a single active user by ID
#[utoipa::path(
    post,
    path = "/Users/Edit/{id}",
    tag = TAG,
    params(("id" = uuid::Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserEnvelope),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn edit<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserEnvelope>> {
    let user = service.get_user(id).await?;

    Ok(Json(UserEnvelope {
        data: user,
        message: "The user was found successfully.".to_string(),
    }))
}

/// Overwrite an active user's fields
#[utoipa::path(
    put,
    path = "/Users/Update/{id}",
    tag = TAG,
    params(("id" = uuid::Uuid, Path, description = "User id")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated successfully", body = UserEnvelope),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<UserEnvelope>> {
    let user = service.update_user(id, input).await?;

    Ok(Json(UserEnvelope {
        data: user,
        message: "The user was updated successfully.".to_string(),
    }))
}

/// Soft-delete a user (id in the request body)
#[utoipa::path(
    delete,
    path = "/Users/Delete",
    tag = TAG,
    request_body = UserIdRequest,
    responses(
        (status = 200, description = "User soft-deleted", body = AckEnvelope),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn destroy<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Json(request): Json<UserIdRequest>,
) -> UserResult<Json<AckEnvelope>> {
    service.delete_user(request.id).await?;

    Ok(Json(AckEnvelope {
        data: true,
        message: "The user was deleted successfully.".to_string(),
    }))
}

/// Restore a soft-deleted user (id in the request body)
#[utoipa::path(
    put,
    path = "/Users/Restore",
    tag = TAG,
    request_body = UserIdRequest,
    responses(
        (status = 200, description = "User restored", body = AckEnvelope),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn restore<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Json(request): Json<UserIdRequest>,
) -> UserResult<Json<AckEnvelope>> {
    service.restore_user(request.id).await?;

    Ok(Json(AckEnvelope {
        data: true,
        message: "The user was restored successfully.".to_string(),
    }))
}
