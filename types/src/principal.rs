//! Caller identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// The already-authenticated principal on whose behalf a call executes.
///
/// The ledger treats it as an opaque token: two principals are the same caller
/// iff their strings are byte-for-byte equal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

impl Principal {
    /// Longest accepted identity, in characters.
    pub const MAX_LEN: usize = 128;

    /// Create a principal, rejecting empty, over-long or whitespace-bearing input.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if s.is_empty() {
            return Err(TypesError::EmptyPrincipal);
        }
        let len = s.chars().count();
        if len > Self::MAX_LEN {
            return Err(TypesError::TextTooLong {
                field: "principal",
                len,
                max: Self::MAX_LEN,
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(TypesError::InvalidPrincipal(s));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Principal {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl std::str::FromStr for Principal {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<Principal> for String {
    fn from(p: Principal) -> Self {
        p.0
    }
}
