use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a die in the room, assigned by the game server.
///
/// Zero is never a valid id - the server numbers room items starting at 1, so
/// a zero id marks an empty or corrupt slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DieId(i64);

impl DieId {
    /// Wrap a raw server-assigned id. The caller is responsible for rejecting
    /// zero ids; use [`DieId::from_str`] when parsing untrusted input.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for DieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for DieId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<DieId> for i64 {
    fn from(value: DieId) -> Self {
        value.0
    }
}

impl FromStr for DieId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::parse(format!("Not a die id: '{}'", s)))?;
        if raw == 0 {
            return Err(DomainError::invalid_id(s.to_string()));
        }
        Ok(Self(raw))
    }
}
