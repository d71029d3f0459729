//! In-process record store for users.
//!
//! The store owns a keyed collection of [`User`] records behind a mutex and
//! answers every operation with a response envelope. Iteration order of the
//! collection is unspecified, so list pages are only meaningful as sets.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::TimeDelta;
use mockable::{Clock, DefaultClock};
use pagination::PageWindow;
use tracing::{debug, error, info};

use crate::domain::id_strategy::IdAllocator;
use crate::domain::ports::{
    CreateUserRequest, CreateUserResponse, DeleteUserRequest, DeleteUserResponse,
    GetUserRequest, GetUserResponse, ListUsersRequest, ListUsersResponse, UpdateUserRequest,
    UpdateUserResponse, UserPayload, UserRecords,
};
use crate::domain::{Error, IdStrategy, NewUser, User, UserChanges, UserId};

struct SampleUser {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    age: i32,
    age_hours: i64,
}

const SAMPLE_USERS: [SampleUser; 2] = [
    SampleUser {
        id: "1",
        name: "John Doe",
        email: "john.doe@example.com",
        age: 30,
        age_hours: 24,
    },
    SampleUser {
        id: "2",
        name: "Jane Smith",
        email: "jane.smith@example.com",
        age: 25,
        age_hours: 12,
    },
];

struct StoreState {
    records: HashMap<UserId, User>,
    ids: IdAllocator,
}

/// Keyed collection of user records.
///
/// A fresh store holds two sample users, `"1"` (John Doe) and `"2"` (Jane
/// Smith), created 24 and 12 hours before construction.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use user_service::domain::{IdStrategy, NewUser, UserStore};
///
/// let store = UserStore::new(Arc::new(DefaultClock), IdStrategy::LiveCount);
/// let created = store
///     .create(NewUser { name: "A".into(), email: "a@x.com".into(), age: 20 })
///     .expect("store available");
/// assert_eq!(created.user.id, "3");
/// assert_eq!(store.len().expect("store available"), 3);
/// ```
pub struct UserStore {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock), IdStrategy::default())
    }
}

impl UserStore {
    /// Create a store seeded with the sample users.
    pub fn new(clock: Arc<dyn Clock>, strategy: IdStrategy) -> Self {
        let start = clock.utc();
        let records: HashMap<UserId, User> = SAMPLE_USERS
            .iter()
            .map(|sample| {
                let user = User::create(
                    UserId::new(sample.id),
                    NewUser {
                        name: sample.name.to_owned(),
                        email: sample.email.to_owned(),
                        age: sample.age,
                    },
                    start - TimeDelta::hours(sample.age_hours),
                );
                (user.id().clone(), user)
            })
            .collect();

        let issued = u64::try_from(records.len()).unwrap_or(u64::MAX);
        info!(
            users = records.len(),
            id_strategy = %strategy,
            "initialised sample user data"
        );
        Self {
            state: Mutex::new(StoreState {
                records,
                ids: IdAllocator::new(strategy, issued),
            }),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, Error> {
        self.state.lock().map_err(|_| {
            error!("user store lock poisoned");
            Error::internal("user store lock poisoned")
        })
    }

    /// Number of live records.
    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.lock()?.records.len())
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }

    /// Identifier policy used by [`UserStore::create`].
    pub fn id_strategy(&self) -> Result<IdStrategy, Error> {
        Ok(self.lock()?.ids.strategy())
    }

    /// Look up one user.
    pub fn get(&self, id: &UserId) -> Result<GetUserResponse, Error> {
        let state = self.lock()?;
        Ok(match state.records.get(id) {
            Some(user) => GetUserResponse::found(user),
            None => {
                debug!(user_id = %id, "user not found");
                GetUserResponse::not_found()
            }
        })
    }

    /// Insert a new user under a freshly allocated identifier.
    ///
    /// Under [`IdStrategy::LiveCount`] the identifier may already be live
    /// after earlier deletions; the new record then replaces it.
    pub fn create(&self, fields: NewUser) -> Result<CreateUserResponse, Error> {
        let now = self.clock.utc();
        let mut state = self.lock()?;
        let live_count = state.records.len();
        let id = UserId::new(state.ids.allocate(live_count));
        let user = User::create(id.clone(), fields, now);
        let response = CreateUserResponse::created(&user);
        if state.records.insert(id.clone(), user).is_some() {
            debug!(user_id = %id, "new user replaced an existing record");
        }
        Ok(response)
    }

    /// Apply a partial update to an existing user.
    pub fn update(&self, id: &UserId, changes: UserChanges) -> Result<UpdateUserResponse, Error> {
        let now = self.clock.utc();
        let mut state = self.lock()?;
        Ok(match state.records.get_mut(id) {
            Some(user) => {
                user.apply(changes, now);
                UpdateUserResponse::updated(user)
            }
            None => {
                debug!(user_id = %id, "user not found");
                UpdateUserResponse::not_found()
            }
        })
    }

    /// Remove a user.
    pub fn delete(&self, id: &UserId) -> Result<DeleteUserResponse, Error> {
        let mut state = self.lock()?;
        Ok(match state.records.remove(id) {
            Some(_) => DeleteUserResponse::deleted(),
            None => {
                debug!(user_id = %id, "user not found");
                DeleteUserResponse::not_found()
            }
        })
    }

    /// Return one page of users in unspecified order.
    ///
    /// `total` always counts every live user.
    pub fn list(&self, page: ListUsersRequest) -> Result<ListUsersResponse, Error> {
        let state = self.lock()?;
        let total = state.records.len();
        Ok(match page.window(total) {
            PageWindow::BeyondEnd => ListUsersResponse::beyond_end(total),
            window => {
                let users: Vec<&User> = state.records.values().collect();
                let payloads = window
                    .select(users)
                    .into_iter()
                    .map(UserPayload::from)
                    .collect();
                ListUsersResponse::page(payloads, total)
            }
        })
    }
}

#[async_trait]
impl UserRecords for UserStore {
    async fn get_user(&self, request: GetUserRequest) -> Result<GetUserResponse, Error> {
        self.get(&UserId::new(request.id))
    }

    async fn create_user(&self, request: CreateUserRequest) -> Result<CreateUserResponse, Error> {
        let CreateUserRequest { name, email, age } = request;
        self.create(NewUser { name, email, age })
    }

    async fn update_user(&self, request: UpdateUserRequest) -> Result<UpdateUserResponse, Error> {
        let UpdateUserRequest {
            id,
            name,
            email,
            age,
        } = request;
        self.update(&UserId::new(id), UserChanges::from_wire(name, email, age))
    }

    async fn delete_user(&self, request: DeleteUserRequest) -> Result<DeleteUserResponse, Error> {
        self.delete(&UserId::new(request.id))
    }

    async fn list_users(&self, request: ListUsersRequest) -> Result<ListUsersResponse, Error> {
        self.list(request)
    }
}
