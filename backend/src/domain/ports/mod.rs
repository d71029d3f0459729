//! Domain ports defining the edges of the hexagon.

mod user_records;

#[cfg(test)]
pub use user_records::MockUserRecords;
pub use user_records::{
    CreateUserRequest, CreateUserResponse, DeleteUserRequest, DeleteUserResponse,
    GetUserRequest, GetUserResponse, ListUsersRequest, ListUsersResponse, NO_USERS_ON_PAGE,
    USER_CREATED, USER_DELETED, USER_NOT_FOUND, USER_RETRIEVED, USER_UPDATED, USERS_RETRIEVED,
    UpdateUserRequest, UpdateUserResponse, UserPayload, UserRecords,
};
