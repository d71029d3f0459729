//! User record model.
//!
//! A [`User`] is owned by the record store. Identifiers are opaque strings
//! and free-text fields are not validated; the only rules the model itself
//! enforces are that `created_at` never moves and `updated_at` never
//! precedes it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque user identifier.
///
/// Any string is accepted, including the empty string; lookups with an
/// identifier that was never issued simply miss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Field values for a user about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name, stored verbatim.
    pub name: String,
    /// Contact address, stored verbatim and never validated.
    pub email: String,
    /// Age in years. Any value is accepted on creation.
    pub age: i32,
}

/// Partial update applied to an existing user.
///
/// `None` leaves the stored value untouched. Build it from wire values with
/// [`UserChanges::from_wire`], where an empty string or a non-positive age
/// means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement email.
    pub email: Option<String>,
    /// Replacement age. Always positive when built by `from_wire`.
    pub age: Option<i32>,
}

impl UserChanges {
    /// Interpret wire values using the "set if present" rule.
    ///
    /// # Examples
    /// ```
    /// use user_service::domain::UserChanges;
    ///
    /// let changes = UserChanges::from_wire("New".into(), String::new(), 0);
    /// assert_eq!(changes.name.as_deref(), Some("New"));
    /// assert!(changes.email.is_none());
    /// assert!(changes.age.is_none());
    /// ```
    pub fn from_wire(name: String, email: String, age: i32) -> Self {
        Self {
            name: (!name.is_empty()).then_some(name),
            email: (!email.is_empty()).then_some(email),
            age: (age > 0).then_some(age),
        }
    }

    /// Whether no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }
}

/// A live user record.
///
/// ## Invariants
/// - `created_at` is fixed at construction.
/// - `updated_at >= created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    age: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a record whose timestamps both equal `now`.
    pub fn create(id: UserId, fields: NewUser, now: DateTime<Utc>) -> Self {
        let NewUser { name, email, age } = fields;
        Self {
            id,
            name,
            email,
            age,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply `changes` and refresh `updated_at`.
    ///
    /// The timestamp is refreshed even when `changes` is empty. A clock that
    /// reads earlier than the creation time is clamped so the ordering
    /// invariant holds.
    pub fn apply(&mut self, changes: UserChanges, now: DateTime<Utc>) {
        let UserChanges { name, email, age } = changes;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(age) = age {
            self.age = age;
        }
        self.updated_at = now.max(self.created_at);
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Age in years.
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last successful mutation, or creation.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
