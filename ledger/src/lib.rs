//! The tally ledger: a deterministic, single-value state machine.
//!
//! Two independent pieces of state live here: a monotonic counter and a
//! poll registry with its vote ledger. Calls are delivered one at a time in a
//! total order; each runs to completion, either applying its whole effect and
//! returning its events, or failing with one [`ContractError`] code and
//! changing nothing.
//!
//! Caller identity and height are inputs to every mutation; nothing is read
//! from ambient state.

pub mod call;
pub mod counter;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod snapshot;
pub mod state;

pub use call::{Call, CallContext, CallOutcome, Query, Response};
pub use counter::Counter;
pub use error::LedgerError;
pub use event::{Emitted, EventLog, LedgerEvent};
pub use snapshot::LedgerSnapshot;
pub use state::LedgerState;
pub use tally_types::ContractError;
