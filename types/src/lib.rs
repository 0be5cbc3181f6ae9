//! Fundamental types for the tally ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! caller identities, heights, poll/option identifiers, bounded text, and the
//! numeric error codes returned by every entry point.

pub mod error;
pub mod ids;
pub mod principal;
pub mod text;
pub mod time;

pub use error::{ContractError, ErrorKind, TypesError};
pub use ids::{OptionIndex, PollId};
pub use principal::Principal;
pub use text::{OptionName, Title};
pub use time::Height;
