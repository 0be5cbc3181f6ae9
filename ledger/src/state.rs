//! The ledger state and its entry points.
//!
//! One value holds everything: the counter, the poll registry and the vote
//! ledger. Each mutating entry point borrows it exclusively for one call,
//! validates before touching anything, and returns the events it produced.
//! Read-only entry points take `&self` and can neither mutate nor emit.

use serde::{Deserialize, Serialize};
use tally_polls::{OptionInfo, PollInfo, PollRegistry, PollResults, VoteLedger};
use tally_types::{ContractError, OptionIndex, OptionName, PollId, Principal, Title};

use crate::call::CallContext;
use crate::counter::Counter;
use crate::event::{Emitted, LedgerEvent};

/// The entire ledger-resident state. `Default` is genesis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    counter: Counter,
    polls: PollRegistry,
    votes: VoteLedger,
}

impl LedgerState {
    /// All-zero state: counter 0, no polls, no votes.
    pub fn genesis() -> Self {
        Self::default()
    }

    pub fn polls(&self) -> &PollRegistry {
        &self.polls
    }

    pub fn votes(&self) -> &VoteLedger {
        &self.votes
    }

    // ── Counter ────────────────────────────────────────────────────────

    pub fn increment(&mut self, ctx: &CallContext) -> Emitted<u128> {
        let new_value = self.counter.increment();
        Emitted::new(
            new_value,
            LedgerEvent::CounterIncremented {
                caller: ctx.caller.clone(),
                new_value,
                height: ctx.height,
            },
        )
    }

    pub fn decrement(&mut self, ctx: &CallContext) -> Result<Emitted<u128>, ContractError> {
        let new_value = self.counter.decrement()?;
        Ok(Emitted::new(
            new_value,
            LedgerEvent::CounterDecremented {
                caller: ctx.caller.clone(),
                new_value,
                height: ctx.height,
            },
        ))
    }

    pub fn get_counter(&self) -> u128 {
        self.counter.value()
    }

    // ── Polls ──────────────────────────────────────────────────────────

    /// Create a poll owned by the caller. Fails with `EmptyOptions` only.
    pub fn create_poll(
        &mut self,
        title: Title,
        options: Vec<OptionName>,
        ctx: &CallContext,
    ) -> Result<Emitted<PollId>, ContractError> {
        let option_count = options.len() as u64;
        let poll_id = self
            .polls
            .create_poll(title.clone(), options, ctx.caller.clone())?;
        Ok(Emitted::new(
            poll_id,
            LedgerEvent::PollCreated {
                poll_id,
                title,
                creator: ctx.caller.clone(),
                option_count,
                height: ctx.height,
            },
        ))
    }

    /// Cast the caller's one vote on `poll_id`.
    ///
    /// Error precedence: `PollNotFound`, `PollClosed`, `AlreadyVoted`, `InvalidOption`.
    pub fn vote(
        &mut self,
        poll_id: PollId,
        option_index: OptionIndex,
        ctx: &CallContext,
    ) -> Result<Emitted<bool>, ContractError> {
        self.polls
            .cast_vote(&mut self.votes, poll_id, option_index, &ctx.caller)?;
        Ok(Emitted::new(
            true,
            LedgerEvent::VoteCast {
                poll_id,
                voter: ctx.caller.clone(),
                option_index,
                height: ctx.height,
            },
        ))
    }

    /// Close `poll_id`. Only its creator may, and only once.
    ///
    /// Error precedence: `PollNotFound`, `Unauthorized`, `PollClosed`.
    pub fn close_poll(
        &mut self,
        poll_id: PollId,
        ctx: &CallContext,
    ) -> Result<Emitted<bool>, ContractError> {
        let total_votes = self.polls.close_poll(poll_id, &ctx.caller)?;
        Ok(Emitted::new(
            true,
            LedgerEvent::PollClosed {
                poll_id,
                creator: ctx.caller.clone(),
                total_votes,
                height: ctx.height,
            },
        ))
    }

    pub fn get_total_polls(&self) -> u64 {
        self.polls.total_polls()
    }

    pub fn get_poll_info(&self, poll_id: PollId) -> Result<PollInfo, ContractError> {
        self.polls.poll_info(poll_id)
    }

    pub fn get_poll_results(&self, poll_id: PollId) -> Result<PollResults, ContractError> {
        self.polls.poll_results(poll_id)
    }

    pub fn get_option_info(
        &self,
        poll_id: PollId,
        option_index: OptionIndex,
    ) -> Result<OptionInfo, ContractError> {
        self.polls.option_info(poll_id, option_index)
    }

    pub fn get_option_votes(
        &self,
        poll_id: PollId,
        option_index: OptionIndex,
    ) -> Result<u64, ContractError> {
        self.polls.option_votes(poll_id, option_index)
    }

    /// Whether `identity` has voted on `poll_id`.
    ///
    /// Unlike the other poll-scoped reads this never fails: an unknown poll
    /// answers `false` instead of `PollNotFound`.
    pub fn has_voted(&self, poll_id: PollId, identity: &Principal) -> bool {
        self.votes.has_voted(poll_id, identity)
    }
}
