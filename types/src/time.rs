//! Ledger height supplied by the delivery environment.
//!
//! The ledger never reads a clock. Every call carries the height at which it is
//! applied, and that value is copied into emitted events for auditability.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque, monotonically non-decreasing ordering value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Height(u64);

impl Height {
    /// Genesis height.
    pub const GENESIS: Self = Self(0);

    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Whether `self` may follow `previous` in a delivered call sequence.
    pub fn follows(&self, previous: Height) -> bool {
        self.0 >= previous.0
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for Height {
    fn from(height: u64) -> Self {
        Self(height)
    }
}
