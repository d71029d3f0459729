//! User record handlers.
//!
//! ```text
//! GET    /api/v1/users/{id}
//! POST   /api/v1/users            {"name":"A","email":"a@x.com","age":20}
//! PUT    /api/v1/users/{id}       {"name":"","email":"","age":31}
//! DELETE /api/v1/users/{id}
//! GET    /api/v1/users?page=1&limit=10
//! ```
//!
//! Every handler answers 200 with the store's envelope, including when the
//! user does not exist. Missing body or query fields decode as `""` and `0`.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ports::{
    CreateUserRequest, CreateUserResponse, DeleteUserRequest, DeleteUserResponse,
    GetUserRequest, GetUserResponse, ListUsersRequest, ListUsersResponse, UpdateUserRequest,
    UpdateUserResponse,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    CreateUserResponseSchema, DeleteUserResponseSchema, ErrorSchema, GetUserResponseSchema,
    ListUsersResponseSchema, UpdateUserResponseSchema,
};
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/v1/users` and `PUT /api/v1/users/{id}`.
///
/// On update, `""` and non-positive ages mean "leave unchanged".
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct UserFields {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = 36)]
    pub age: i32,
}

/// Query string of `GET /api/v1/users`.
#[derive(Debug, Clone, Copy, Default, Deserialize, utoipa::IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// One-based page number.
    #[param(example = 1)]
    pub page: i32,
    /// Page size.
    #[param(example = 10)]
    pub limit: i32,
}

impl From<PageQuery> for ListUsersRequest {
    fn from(query: PageQuery) -> Self {
        Self::new(query.page, query.limit)
    }
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Lookup envelope; `success` is false when absent", body = GetUserResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<GetUserResponse>> {
    let id = id.into_inner();
    info!(user_id = %id, "get user");
    let response = state.users.get_user(GetUserRequest { id }).await?;
    Ok(web::Json(response))
}

/// Create a user with the next identifier.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserFields,
    responses(
        (status = 200, description = "Created user", body = CreateUserResponseSchema),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserFields>,
) -> ApiResult<web::Json<CreateUserResponse>> {
    let UserFields { name, email, age } = payload.into_inner();
    info!("create user");
    let response = state
        .users
        .create_user(CreateUserRequest { name, email, age })
        .await?;
    Ok(web::Json(response))
}

/// Partially update a user.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserFields,
    responses(
        (status = 200, description = "Update envelope; `success` is false when absent", body = UpdateUserResponseSchema),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<UserFields>,
) -> ApiResult<web::Json<UpdateUserResponse>> {
    let id = id.into_inner();
    let UserFields { name, email, age } = payload.into_inner();
    info!(user_id = %id, "update user");
    let response = state
        .users
        .update_user(UpdateUserRequest {
            id,
            name,
            email,
            age,
        })
        .await?;
    Ok(web::Json(response))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Delete envelope; `success` is false when absent", body = DeleteUserResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<DeleteUserResponse>> {
    let id = id.into_inner();
    info!(user_id = %id, "delete user");
    let response = state.users.delete_user(DeleteUserRequest { id }).await?;
    Ok(web::Json(response))
}

/// List one page of users.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of users with the total collection size", body = ListUsersResponseSchema),
        (status = 400, description = "Non-numeric query values", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<ListUsersResponse>> {
    let query = query.into_inner();
    info!(page = query.page, limit = query.limit, "list users");
    let response = state.users.list_users(query.into()).await?;
    Ok(web::Json(response))
}

/// Register the user handlers. Mount inside the `/api/v1` scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use user_service::inbound::http::users;
///
/// let app = App::new().service(web::scope("/api/v1").configure(users::configure));
/// # let _ = app;
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(create_user)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}
