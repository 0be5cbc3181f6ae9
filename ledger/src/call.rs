//! The call surface: what the delivery layer hands the ledger, and what it gets back.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tally_polls::{OptionInfo, PollInfo, PollResults};
use tally_types::{ContractError, Height, OptionIndex, OptionName, PollId, Principal, Title};

use crate::event::LedgerEvent;

/// Ambient facts of one delivered call, passed explicitly to every mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub caller: Principal,
    pub height: Height,
}

impl CallContext {
    pub fn new(caller: Principal, height: Height) -> Self {
        Self { caller, height }
    }
}

/// A mutating entry point and its arguments.
///
/// JSON form: `{"function":"vote","poll-id":0,"option-index":1}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum Call {
    Increment,
    Decrement,
    CreatePoll {
        title: Title,
        options: Vec<OptionName>,
    },
    Vote {
        poll_id: PollId,
        option_index: OptionIndex,
    },
    ClosePoll {
        poll_id: PollId,
    },
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::CreatePoll { .. } => "create-poll",
            Self::Vote { .. } => "vote",
            Self::ClosePoll { .. } => "close-poll",
        }
    }
}

/// A read-only entry point and its arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum Query {
    GetCounter,
    GetTotalPolls,
    GetPollInfo {
        poll_id: PollId,
    },
    GetPollResults {
        poll_id: PollId,
    },
    GetOptionInfo {
        poll_id: PollId,
        option_index: OptionIndex,
    },
    GetOptionVotes {
        poll_id: PollId,
        option_index: OptionIndex,
    },
    HasVoted {
        poll_id: PollId,
        identity: Principal,
    },
}

impl Query {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetCounter => "get-counter",
            Self::GetTotalPolls => "get-total-polls",
            Self::GetPollInfo { .. } => "get-poll-info",
            Self::GetPollResults { .. } => "get-poll-results",
            Self::GetOptionInfo { .. } => "get-option-info",
            Self::GetOptionVotes { .. } => "get-option-votes",
            Self::HasVoted { .. } => "has-voted",
        }
    }
}

/// Success value of any entry point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Uint(u128),
    Bool(bool),
    PollInfo(PollInfo),
    PollResults(PollResults),
    OptionInfo(OptionInfo),
}

/// Result of one delivered call plus the events it emitted.
///
/// A rejected call always carries an empty event list.
/// Serializes as `{"ok": …, "events": […]}` or `{"err": 103, "events": []}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallOutcome {
    pub result: Result<Response, ContractError>,
    pub events: Vec<LedgerEvent>,
}

impl CallOutcome {
    pub fn rejected(error: ContractError) -> Self {
        Self {
            result: Err(error),
            events: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// The error code, if the call was rejected.
    pub fn code(&self) -> Option<u32> {
        self.result.as_ref().err().map(|e| e.code())
    }
}

impl Serialize for CallOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match &self.result {
            Ok(value) => map.serialize_entry("ok", value)?,
            Err(error) => map.serialize_entry("err", error)?,
        }
        map.serialize_entry("events", &self.events)?;
        map.end()
    }
}
