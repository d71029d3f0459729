//! OpenAPI schema definitions for domain and port types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their wire shape for documentation only, and are
//! referenced from the `#[utoipa::path]` annotations in the handlers.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request could not be decoded.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "query parameters must be integers")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ports::UserPayload`].
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(example = "1")]
    id: String,
    #[schema(example = "John Doe")]
    name: String,
    #[schema(example = "john.doe@example.com")]
    email: String,
    #[schema(example = 30)]
    age: i32,
    /// RFC 3339 creation instant in UTC.
    #[schema(rename = "createdAt", example = "2024-04-30T09:00:00Z")]
    created_at: String,
    /// RFC 3339 instant of the last update in UTC.
    #[schema(rename = "updatedAt", example = "2024-04-30T09:00:00Z")]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::ports::GetUserResponse`].
#[derive(ToSchema)]
#[schema(as = GetUserResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GetUserResponseSchema {
    /// Present only when `success` is true.
    user: Option<UserSchema>,
    success: bool,
    #[schema(example = "User retrieved successfully")]
    message: String,
}

/// OpenAPI schema for [`crate::domain::ports::CreateUserResponse`].
#[derive(ToSchema)]
#[schema(as = CreateUserResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreateUserResponseSchema {
    user: UserSchema,
    success: bool,
    #[schema(example = "User created successfully")]
    message: String,
}

/// OpenAPI schema for [`crate::domain::ports::UpdateUserResponse`].
#[derive(ToSchema)]
#[schema(as = UpdateUserResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UpdateUserResponseSchema {
    /// Present only when `success` is true.
    user: Option<UserSchema>,
    success: bool,
    #[schema(example = "User updated successfully")]
    message: String,
}

/// OpenAPI schema for [`crate::domain::ports::DeleteUserResponse`].
#[derive(ToSchema)]
#[schema(as = DeleteUserResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DeleteUserResponseSchema {
    success: bool,
    #[schema(example = "User deleted successfully")]
    message: String,
}

/// OpenAPI schema for [`crate::domain::ports::ListUsersResponse`].
#[derive(ToSchema)]
#[schema(as = ListUsersResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ListUsersResponseSchema {
    users: Vec<UserSchema>,
    /// Size of the whole collection, not of this page.
    #[schema(example = 2)]
    total: u64,
    success: bool,
    #[schema(example = "Users retrieved successfully")]
    message: String,
}
