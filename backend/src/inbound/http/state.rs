//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the
//! [`UserRecords`] port, so they can be exercised against mocks.

use std::sync::Arc;

use crate::domain::ports::UserRecords;

/// Dependency bundle for the user API handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRecords>,
}

impl HttpState {
    /// Build state from a record port implementation.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use user_service::domain::UserStore;
    /// use user_service::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(UserStore::default()));
    /// # let _ = state;
    /// ```
    pub fn new(users: Arc<dyn UserRecords>) -> Self {
        Self { users }
    }
}
