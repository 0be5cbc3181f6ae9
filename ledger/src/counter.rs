//! Counter store: a single non-negative integer.

use serde::{Deserialize, Serialize};
use tally_types::ContractError;

/// Monotonic counter with underflow protection. Decrementing at zero is
/// rejected, never clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counter(u128);

impl Counter {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn value(&self) -> u128 {
        self.0
    }

    /// Add one and return the new value.
    pub fn increment(&mut self) -> u128 {
        // 2^128 increments cannot be delivered; saturate rather than panic.
        self.0 = self.0.saturating_add(1);
        self.0
    }

    /// Subtract one and return the new value.
    pub fn decrement(&mut self) -> Result<u128, ContractError> {
        self.0 = self.0.checked_sub(1).ok_or(ContractError::Underflow)?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(Counter::new().value(), 0);
    }

    #[test]
    fn test_increment_then_decrement() {
        let mut counter = Counter::new();
        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert_eq!(counter.decrement(), Ok(1));
        assert_eq!(counter.value(), 1);
    }

    #[test]
    fn test_decrement_at_zero_is_rejected() {
        let mut counter = Counter::new();
        assert_eq!(counter.decrement(), Err(ContractError::Underflow));
        assert_eq!(counter.value(), 0);
    }
}
