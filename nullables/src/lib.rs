//! Nullable infrastructure for deterministic testing.
//!
//! The ledger's external collaborators (the height source and the component
//! that orders and delivers calls) are replaced here by test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Record everything they deliver for later assertions
//!
//! Usage: drive a [`NullDelivery`] from tests instead of wiring up a real
//! delivery layer.

pub mod delivery;
pub mod height;

pub use delivery::{create_poll_call, Delivered, NullDelivery};
pub use height::NullHeight;
