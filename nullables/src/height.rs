//! Nullable height source: deterministic ledger height for testing.

use std::cell::Cell;
use tally_types::Height;

/// A deterministic height source.
///
/// Height only advances when you tell it to.
pub struct NullHeight {
    current: Cell<u64>,
}

impl NullHeight {
    pub fn new(initial: u64) -> Self {
        Self {
            current: Cell::new(initial),
        }
    }

    /// Get the current height.
    pub fn now(&self) -> Height {
        Height::new(self.current.get())
    }

    /// Advance by a number of blocks.
    pub fn advance(&self, blocks: u64) {
        self.current.set(self.current.get().saturating_add(blocks));
    }

    /// Set the height to a specific value.
    pub fn set(&self, height: u64) {
        self.current.set(height);
    }
}

impl Default for NullHeight {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_and_set() {
        let height = NullHeight::new(5);
        assert_eq!(height.now(), Height::new(5));
        height.advance(3);
        assert_eq!(height.now(), Height::new(8));
        height.set(1);
        assert_eq!(height.now(), Height::new(1));
    }
}
