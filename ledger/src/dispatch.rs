//! Function-selector dispatch over [`LedgerState`].

use tally_types::ContractError;

use crate::call::{Call, CallContext, CallOutcome, Query, Response};
use crate::event::Emitted;
use crate::state::LedgerState;

impl LedgerState {
    /// Apply one delivered call. Runs to completion; a rejection leaves the
    /// state untouched and carries no events.
    pub fn execute(&mut self, call: Call, ctx: &CallContext) -> CallOutcome {
        let function = call.name();
        let result: Result<Emitted<Response>, ContractError> = match call {
            Call::Increment => Ok(self.increment(ctx).map(Response::Uint)),
            Call::Decrement => self.decrement(ctx).map(|e| e.map(Response::Uint)),
            Call::CreatePoll { title, options } => self
                .create_poll(title, options, ctx)
                .map(|e| e.map(|id| Response::Uint(u128::from(id)))),
            Call::Vote {
                poll_id,
                option_index,
            } => self
                .vote(poll_id, option_index, ctx)
                .map(|e| e.map(Response::Bool)),
            Call::ClosePoll { poll_id } => self
                .close_poll(poll_id, ctx)
                .map(|e| e.map(Response::Bool)),
        };

        match result {
            Ok(emitted) => {
                debug_assert!(!emitted.events.is_empty(), "{function} applied without an event");
                tracing::debug!(
                    caller = %ctx.caller,
                    height = %ctx.height,
                    function,
                    events = emitted.events.len(),
                    "call applied"
                );
                CallOutcome {
                    result: Ok(emitted.value),
                    events: emitted.events.into(),
                }
            }
            Err(error) => {
                tracing::info!(
                    caller = %ctx.caller,
                    height = %ctx.height,
                    function,
                    code = error.code(),
                    "call rejected: {error}"
                );
                CallOutcome::rejected(error)
            }
        }
    }

    /// Answer a read-only query.
    pub fn query(&self, query: &Query) -> Result<Response, ContractError> {
        let response = match query {
            Query::GetCounter => Response::Uint(self.get_counter()),
            Query::GetTotalPolls => Response::Uint(u128::from(self.get_total_polls())),
            Query::GetPollInfo { poll_id } => Response::PollInfo(self.get_poll_info(*poll_id)?),
            Query::GetPollResults { poll_id } => {
                Response::PollResults(self.get_poll_results(*poll_id)?)
            }
            Query::GetOptionInfo {
                poll_id,
                option_index,
            } => Response::OptionInfo(self.get_option_info(*poll_id, *option_index)?),
            Query::GetOptionVotes {
                poll_id,
                option_index,
            } => Response::Uint(u128::from(
                self.get_option_votes(*poll_id, *option_index)?,
            )),
            Query::HasVoted { poll_id, identity } => {
                Response::Bool(self.has_voted(*poll_id, identity))
            }
        };
        tracing::trace!(query = query.name(), "query answered");
        Ok(response)
    }
}
