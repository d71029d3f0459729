//! Domain primitives, the user record store, and the ports it serves.
//!
//! Purpose: keep the record rules (id allocation, partial updates,
//! pagination) transport agnostic. Inbound adapters translate wire requests
//! into [`ports::UserRecords`] calls and map [`Error`] onto their own status
//! codes.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: failures that cannot travel in an envelope.
//! - `User`, `UserId`, `NewUser`, `UserChanges`: the record model.
//! - `UserStore`: the in-process record store.
//! - `IdStrategy`: identifier allocation policy.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod id_strategy;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_store;

pub use self::error::{Error, ErrorCode};
pub use self::id_strategy::{IdStrategy, IdStrategyParseError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserChanges, UserId};
pub use self::user_store::UserStore;
