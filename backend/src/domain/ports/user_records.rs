//! Driving port for the five user-record operations.
//!
//! Requests carry raw wire values; responses are envelopes with a `success`
//! flag and a human-readable `message`. A missing user is reported through
//! the envelope (`success == false`), never through the `Err` arm, which is
//! reserved for internal faults.

use async_trait::async_trait;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, User};

/// Message returned when the target user does not exist.
pub const USER_NOT_FOUND: &str = "User not found";
/// Message returned when a lookup finds the user.
pub const USER_RETRIEVED: &str = "User retrieved successfully";
/// Message returned after a user is created.
pub const USER_CREATED: &str = "User created successfully";
/// Message returned after a user is updated.
pub const USER_UPDATED: &str = "User updated successfully";
/// Message returned after a user is deleted.
pub const USER_DELETED: &str = "User deleted successfully";
/// Message returned with a non-empty or clamped page of users.
pub const USERS_RETRIEVED: &str = "Users retrieved successfully";
/// Message returned when the requested page starts past the last user.
pub const NO_USERS_ON_PAGE: &str = "No users found for the given page";

/// Wire representation of a user with RFC 3339 timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserPayload {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            age: user.age(),
            created_at: user.created_at().to_rfc3339_opts(SecondsFormat::Secs, true),
            updated_at: user.updated_at().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Request to fetch one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetUserRequest {
    pub id: String,
}

/// Envelope for a single-user lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserPayload>,
    pub success: bool,
    pub message: String,
}

impl GetUserResponse {
    /// Successful lookup carrying the user.
    pub fn found(user: &User) -> Self {
        Self {
            user: Some(user.into()),
            success: true,
            message: USER_RETRIEVED.to_owned(),
        }
    }

    /// Envelope reporting that no user has the requested id.
    pub fn not_found() -> Self {
        Self {
            user: None,
            success: false,
            message: USER_NOT_FOUND.to_owned(),
        }
    }
}

/// Request to create a user. Fields are stored verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Envelope for user creation. Creation always succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user: UserPayload,
    pub success: bool,
    pub message: String,
}

impl CreateUserResponse {
    /// Successful creation carrying the new user.
    pub fn created(user: &User) -> Self {
        Self {
            user: user.into(),
            success: true,
            message: USER_CREATED.to_owned(),
        }
    }
}

/// Request to update a user.
///
/// Empty strings and non-positive ages mean "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Envelope for a user update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserPayload>,
    pub success: bool,
    pub message: String,
}

impl UpdateUserResponse {
    /// Successful update carrying the user as stored afterwards.
    pub fn updated(user: &User) -> Self {
        Self {
            user: Some(user.into()),
            success: true,
            message: USER_UPDATED.to_owned(),
        }
    }

    /// Envelope reporting that no user has the requested id.
    pub fn not_found() -> Self {
        Self {
            user: None,
            success: false,
            message: USER_NOT_FOUND.to_owned(),
        }
    }
}

/// Request to delete a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteUserRequest {
    pub id: String,
}

/// Envelope for a deletion. Carries no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteUserResponse {
    /// Successful deletion.
    pub fn deleted() -> Self {
        Self {
            success: true,
            message: USER_DELETED.to_owned(),
        }
    }

    /// Envelope reporting that no user has the requested id.
    pub fn not_found() -> Self {
        Self {
            success: false,
            message: USER_NOT_FOUND.to_owned(),
        }
    }
}

/// Request for one page of users. Values are not validated.
pub type ListUsersRequest = pagination::PageRequest;

/// Envelope for a page of users.
///
/// `total` counts every live user, not just those on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserPayload>,
    pub total: usize,
    pub success: bool,
    pub message: String,
}

impl ListUsersResponse {
    /// Page of users with the full live count.
    pub fn page(users: Vec<UserPayload>, total: usize) -> Self {
        Self {
            users,
            total,
            success: true,
            message: USERS_RETRIEVED.to_owned(),
        }
    }

    /// Empty page for a start past the last user.
    pub fn beyond_end(total: usize) -> Self {
        Self {
            users: Vec::new(),
            total,
            success: true,
            message: NO_USERS_ON_PAGE.to_owned(),
        }
    }
}

/// Domain use-case port for user records.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), user_service::domain::Error> {
/// use user_service::domain::ports::{GetUserRequest, UserRecords};
/// use user_service::domain::UserStore;
///
/// let store = UserStore::default();
/// let response = store
///     .get_user(GetUserRequest { id: "1".to_owned() })
///     .await?;
/// assert!(response.success);
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRecords: Send + Sync {
    /// Fetch one user by identifier.
    async fn get_user(&self, request: GetUserRequest) -> Result<GetUserResponse, Error>;

    /// Create a user and allocate its identifier.
    async fn create_user(&self, request: CreateUserRequest) -> Result<CreateUserResponse, Error>;

    /// Partially update an existing user.
    async fn update_user(&self, request: UpdateUserRequest) -> Result<UpdateUserResponse, Error>;

    /// Remove a user.
    async fn delete_user(&self, request: DeleteUserRequest) -> Result<DeleteUserResponse, Error>;

    /// Return one page of users in unspecified order.
    async fn list_users(&self, request: ListUsersRequest) -> Result<ListUsersResponse, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewUser, UserId};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use serde_json::json;

    fn sample_user() -> User {
        let now = Utc
            .with_ymd_and_hms(2024, 3, 9, 8, 30, 15)
            .single()
            .expect("valid timestamp");
        User::create(
            UserId::new("3"),
            NewUser {
                name: "A".to_owned(),
                email: "a@x.com".to_owned(),
                age: 20,
            },
            now,
        )
    }

    #[rstest]
    fn payload_renders_rfc3339_timestamps() {
        let payload = UserPayload::from(&sample_user());
        let value = serde_json::to_value(&payload).expect("serialise payload");
        assert_eq!(
            value,
            json!({
                "id": "3",
                "name": "A",
                "email": "a@x.com",
                "age": 20,
                "createdAt": "2024-03-09T08:30:15Z",
                "updatedAt": "2024-03-09T08:30:15Z",
            })
        );
    }

    #[rstest]
    fn not_found_envelope_omits_user() {
        let value = serde_json::to_value(GetUserResponse::not_found()).expect("serialise");
        assert_eq!(value, json!({ "success": false, "message": "User not found" }));
    }

    #[rstest]
    fn requests_default_missing_fields() {
        let request: UpdateUserRequest =
            serde_json::from_value(json!({ "id": "1" })).expect("deserialise");
        assert_eq!(
            request,
            UpdateUserRequest {
                id: "1".to_owned(),
                ..UpdateUserRequest::default()
            }
        );
    }
}
