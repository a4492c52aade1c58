//! Account identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque account identifier as handed to us by the host ledger.
///
/// The core never interprets the contents; it only compares, hashes and
/// orders identifiers.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Whether this identifier is usable (non-empty, no surrounding whitespace).
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.trim() == self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
