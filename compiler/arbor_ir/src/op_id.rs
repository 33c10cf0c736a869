//! Operation identifiers.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a stored operation.
///
/// Wraps the SQLite row id. Ids are assigned on creation and never reused,
/// so an `OpId` stays meaningful for the lifetime of a program file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct OpId(i64);

impl OpId {
    /// Create an `OpId` from a raw row id.
    #[inline]
    pub const fn new(raw: i64) -> Self {
        OpId(raw)
    }

    /// Get the raw row id.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }
}

impl fmt::Debug for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpId({})", self.0)
    }
}

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OpId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(OpId)
    }
}
