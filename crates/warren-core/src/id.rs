//! Strongly-typed requester identifiers.

use std::fmt;

/// Identifies the entity that asked for a path.
///
/// The dispatcher keys its outstanding-request table by requester id:
/// at most one in-flight search exists per id at a time, and callers
/// poll with the same id until the result is delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequesterId(pub u32);

impl fmt::Display for RequesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RequesterId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
