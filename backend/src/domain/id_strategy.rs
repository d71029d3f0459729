//! Identifier allocation policies for newly created users.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// How the record store picks an identifier for a new user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IdStrategy {
    /// Decimal string of the live record count plus one.
    ///
    /// After a deletion this can reproduce an identifier that is still
    /// live, in which case the new record replaces the old one.
    #[default]
    LiveCount,
    /// Monotonic counter that never hands out the same identifier twice.
    Sequential,
    /// Random UUID v4 strings.
    Random,
}

impl IdStrategy {
    /// Canonical configuration spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LiveCount => "live-count",
            Self::Sequential => "sequential",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a configured strategy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown id strategy `{value}`; expected live-count, sequential or random")]
pub struct IdStrategyParseError {
    pub value: String,
}

impl FromStr for IdStrategy {
    type Err = IdStrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "live-count" => Ok(Self::LiveCount),
            "sequential" => Ok(Self::Sequential),
            "random" => Ok(Self::Random),
            _ => Err(IdStrategyParseError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Allocation state for one store.
#[derive(Debug, Clone)]
pub(crate) struct IdAllocator {
    strategy: IdStrategy,
    next_sequence: u64,
}

impl IdAllocator {
    /// `issued` is the number of identifiers already handed out at seed time.
    pub(crate) fn new(strategy: IdStrategy, issued: u64) -> Self {
        Self {
            strategy,
            next_sequence: issued.saturating_add(1),
        }
    }

    pub(crate) fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    pub(crate) fn allocate(&mut self, live_count: usize) -> String {
        match self.strategy {
            IdStrategy::LiveCount => live_count.saturating_add(1).to_string(),
            IdStrategy::Sequential => {
                let id = self.next_sequence;
                self.next_sequence = self.next_sequence.saturating_add(1);
                id.to_string()
            }
            IdStrategy::Random => Uuid::new_v4().to_string(),
        }
    }
}
