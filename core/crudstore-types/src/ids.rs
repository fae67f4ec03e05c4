//! Identifier types used throughout crudstore.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Handle of an entity in the store.
///
/// Ids are produced by the store's sequence counter (starting at 1) and are
/// never revised or reused. Serializes as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// The first id a fresh sequence hands out.
    pub const FIRST: Self = Self(1);

    /// Wraps a raw integer handle.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer handle.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one, or `None` if the space is exhausted.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    /// Parses an entity id from its decimal form.
    pub fn parse(s: &str) -> crate::Result<Self> {
        Ok(s.parse()?)
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse::<u64>()?))
    }
}
