//! Nullable delivery: applies calls one at a time, in order, and records
//! every outcome.

use serde::Serialize;
use tally_ledger::{Call, CallContext, CallOutcome, EventLog, LedgerState, Query, Response};
use tally_types::{ContractError, OptionName, Principal, Title, TypesError};

use crate::height::NullHeight;

/// One call as it was delivered, with its outcome.
#[derive(Clone, Debug, Serialize)]
pub struct Delivered {
    pub ctx: CallContext,
    pub call: Call,
    pub outcome: CallOutcome,
}

/// A serialized, in-memory stand-in for the external delivery layer.
///
/// Every call runs at the current [`NullHeight`]; the height only moves when
/// the test advances it. All emitted events are appended to one log in
/// delivery order, as an external observer would see them.
pub struct NullDelivery {
    state: LedgerState,
    height: NullHeight,
    events: EventLog,
    transcript: Vec<Delivered>,
}

impl NullDelivery {
    pub fn new() -> Self {
        Self::with_state(LedgerState::genesis())
    }

    pub fn with_state(state: LedgerState) -> Self {
        Self {
            state,
            height: NullHeight::default(),
            events: EventLog::new(),
            transcript: Vec::new(),
        }
    }

    pub fn height(&self) -> &NullHeight {
        &self.height
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Every event emitted so far, in order.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn transcript(&self) -> &[Delivered] {
        &self.transcript
    }

    /// Deliver `call` on behalf of `caller` at the current height.
    pub fn call(&mut self, caller: &Principal, call: Call) -> CallOutcome {
        let ctx = CallContext::new(caller.clone(), self.height.now());
        let outcome = self.state.execute(call.clone(), &ctx);
        self.events.extend(outcome.events.iter().cloned());
        self.transcript.push(Delivered {
            ctx,
            call,
            outcome: outcome.clone(),
        });
        outcome
    }

    pub fn query(&self, query: Query) -> Result<Response, ContractError> {
        self.state.query(&query)
    }
}

impl Default for NullDelivery {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a `create-poll` call from plain strings.
pub fn create_poll_call(title: &str, options: &[&str]) -> Result<Call, TypesError> {
    Ok(Call::CreatePoll {
        title: Title::new(title)?,
        options: options
            .iter()
            .map(|o| OptionName::new(*o))
            .collect::<Result<_, _>>()?,
    })
}
