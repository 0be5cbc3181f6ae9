//! Polls for the tally ledger.
//!
//! A poll is a titled question with a fixed, ordered list of options. It is
//! owned by its creator, accumulates votes while open and is frozen once closed:
//!
//! `Open --close--> Closed` (terminal)
//!
//! Key principle: one identity = one vote per poll, regardless of the option chosen.

pub mod poll;
pub mod registry;
pub mod votes;

pub use poll::{OptionInfo, Poll, PollInfo, PollOption, PollResults, PollStatus};
pub use registry::PollRegistry;
pub use votes::VoteLedger;
