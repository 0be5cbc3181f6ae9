//! Vote ledger: which identities have already voted on which poll.
//!
//! A set, not a counter: presence of `(poll_id, voter)` means that identity has
//! cast its one vote on that poll, whichever option it chose.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tally_types::{PollId, Principal};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteLedger {
    /// poll → identities that have voted on it.
    records: BTreeMap<PollId, BTreeSet<Principal>>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `voter` holds a vote record for `poll_id`.
    ///
    /// An unknown poll simply has no records, so this is `false` rather than an error.
    pub fn has_voted(&self, poll_id: PollId, voter: &Principal) -> bool {
        self.records
            .get(&poll_id)
            .is_some_and(|voters| voters.contains(voter))
    }

    /// Insert a record. Returns `false` if it was already present.
    pub(crate) fn record(&mut self, poll_id: PollId, voter: Principal) -> bool {
        self.records.entry(poll_id).or_default().insert(voter)
    }

    /// Number of identities that have voted on `poll_id`.
    pub fn voter_count(&self, poll_id: PollId) -> usize {
        self.records.get(&poll_id).map_or(0, BTreeSet::len)
    }

    /// Total vote records across all polls.
    pub fn record_count(&self) -> usize {
        self.records.values().map(BTreeSet::len).sum()
    }
}
