//! Events emitted by successful mutations.
//!
//! Events are an output side channel: each entry point hands back the events
//! it produced alongside its value. The ledger never stores or reads them.

use serde::{Deserialize, Serialize};
use tally_types::{Height, OptionIndex, PollId, Principal, Title};

/// A structured notification for external observers.
///
/// Serialized with an `event` discriminator and kebab-case names, e.g.
/// `{"event":"vote-cast","poll-id":0,"voter":"A","option-index":1,"height":7}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum LedgerEvent {
    CounterIncremented {
        caller: Principal,
        new_value: u128,
        height: Height,
    },
    CounterDecremented {
        caller: Principal,
        new_value: u128,
        height: Height,
    },
    PollCreated {
        poll_id: PollId,
        title: Title,
        creator: Principal,
        option_count: u64,
        height: Height,
    },
    VoteCast {
        poll_id: PollId,
        voter: Principal,
        option_index: OptionIndex,
        height: Height,
    },
    /// Carries the final tally at close time.
    PollClosed {
        poll_id: PollId,
        creator: Principal,
        total_votes: u64,
        height: Height,
    },
}

impl LedgerEvent {
    /// The `event` discriminator.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CounterIncremented { .. } => "counter-incremented",
            Self::CounterDecremented { .. } => "counter-decremented",
            Self::PollCreated { .. } => "poll-created",
            Self::VoteCast { .. } => "vote-cast",
            Self::PollClosed { .. } => "poll-closed",
        }
    }

    pub fn height(&self) -> Height {
        match self {
            Self::CounterIncremented { height, .. }
            | Self::CounterDecremented { height, .. }
            | Self::PollCreated { height, .. }
            | Self::VoteCast { height, .. }
            | Self::PollClosed { height, .. } => *height,
        }
    }
}

/// Ordered, append-only event sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog(Vec<LedgerEvent>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: LedgerEvent) {
        self.0.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = LedgerEvent>) {
        self.0.extend(events);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedgerEvent> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[LedgerEvent] {
        &self.0
    }
}

impl From<EventLog> for Vec<LedgerEvent> {
    fn from(log: EventLog) -> Self {
        log.0
    }
}

/// The value of a successful mutation together with the events it produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Emitted<T> {
    pub value: T,
    pub events: EventLog,
}

impl<T> Emitted<T> {
    pub fn new(value: T, event: LedgerEvent) -> Self {
        let mut events = EventLog::new();
        events.push(event);
        Self { value, events }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Emitted<U> {
        Emitted {
            value: f(self.value),
            events: self.events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn who(name: &str) -> Principal {
        Principal::new(name).unwrap()
    }

    #[test]
    fn test_vote_cast_wire_format() {
        let event = LedgerEvent::VoteCast {
            poll_id: 0,
            voter: who("A"),
            option_index: 1,
            height: Height::new(7),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "event": "vote-cast",
                "poll-id": 0,
                "voter": "A",
                "option-index": 1,
                "height": 7
            })
        );
    }

    #[test]
    fn test_poll_created_wire_format() {
        let event = LedgerEvent::PollCreated {
            poll_id: 3,
            title: Title::new("Lunch?").unwrap(),
            creator: who("B"),
            option_count: 2,
            height: Height::new(12),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "poll-created");
        assert_eq!(json["option-count"], 2);
        assert_eq!(json["title"], "Lunch?");

        let back: LedgerEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_name_matches_discriminator() {
        let events = [
            LedgerEvent::CounterIncremented {
                caller: who("a"),
                new_value: 1,
                height: Height::GENESIS,
            },
            LedgerEvent::CounterDecremented {
                caller: who("a"),
                new_value: 0,
                height: Height::GENESIS,
            },
            LedgerEvent::PollClosed {
                poll_id: 0,
                creator: who("a"),
                total_votes: 4,
                height: Height::GENESIS,
            },
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["event"], event.name());
        }
    }

    #[test]
    fn test_event_log_preserves_order() {
        let mut log = EventLog::new();
        for h in 0..3 {
            log.push(LedgerEvent::CounterIncremented {
                caller: who("a"),
                new_value: h as u128 + 1,
                height: Height::new(h),
            });
        }
        let heights: Vec<u64> = log.iter().map(|e| e.height().as_u64()).collect();
        assert_eq!(heights, vec![0, 1, 2]);
    }
}
