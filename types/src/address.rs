//! Actor identity type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An actor (principal) that can join the DAO, propose and vote.
///
/// The identity is supplied by the execution environment; this crate does not
/// derive or authenticate it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(String);

impl ActorId {
    /// Create an actor id from a raw principal string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw principal string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id is well-formed (non-empty, no surrounding whitespace).
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.trim() == self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ActorId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity() {
        assert!(ActorId::new("ST1TEST").is_valid());
        assert!(!ActorId::new("").is_valid());
        assert!(!ActorId::new(" ST1TEST").is_valid());
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(ActorId::from("ST1TEST") < ActorId::from("ST2TEST"));
    }
}
