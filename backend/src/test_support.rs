//! Test utilities shared by unit tests (in `src/`) and integration tests
//! (in `tests/`). Compiled for tests and behind the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{IdStrategy, UserStore};

/// Fixed instant used as "process start" in tests.
pub fn start_instant() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).single() {
        Some(instant) => instant,
        None => panic!("fixed test instant must be valid"),
    }
}

/// Clock whose reading only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Seeded store driven by a [`MutableClock`] starting at [`start_instant`].
pub fn store_with_clock(strategy: IdStrategy) -> (UserStore, Arc<MutableClock>) {
    let clock = Arc::new(MutableClock::new(start_instant()));
    let store = UserStore::new(clock.clone(), strategy);
    (store, clock)
}
