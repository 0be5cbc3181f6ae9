//! Polls, their options, and the read-only views handed to callers.

use serde::{Deserialize, Serialize};
use tally_types::{OptionIndex, OptionName, PollId, Principal, Title};

/// Lifecycle of a poll. `Closed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollStatus {
    /// Accepting votes.
    Open,
    /// Frozen by its creator; tallies never change again.
    Closed,
}

/// One choice within a poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub name: OptionName,
    pub votes: u64,
}

/// A poll and its options.
///
/// Options are created with the poll and are never added, removed or reordered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub id: PollId,
    pub title: Title,
    pub creator: Principal,
    options: Vec<PollOption>,
    total_votes: u64,
    status: PollStatus,
}

impl Poll {
    pub(crate) fn new(
        id: PollId,
        title: Title,
        creator: Principal,
        options: Vec<OptionName>,
    ) -> Self {
        Self {
            id,
            title,
            creator,
            options: options
                .into_iter()
                .map(|name| PollOption { name, votes: 0 })
                .collect(),
            total_votes: 0,
            status: PollStatus::Open,
        }
    }

    pub fn option_count(&self) -> u64 {
        self.options.len() as u64
    }

    pub fn total_votes(&self) -> u64 {
        self.total_votes
    }

    pub fn is_active(&self) -> bool {
        self.status == PollStatus::Open
    }

    pub fn options(&self) -> &[PollOption] {
        &self.options
    }

    /// The option at `index`, if it is within `0..option_count`.
    pub fn option(&self, index: OptionIndex) -> Option<&PollOption> {
        usize::try_from(index).ok().and_then(|i| self.options.get(i))
    }

    /// Count one vote for `index`. The caller has already validated the index.
    pub(crate) fn tally(&mut self, index: OptionIndex) -> bool {
        let Some(option) = usize::try_from(index)
            .ok()
            .and_then(|i| self.options.get_mut(i))
        else {
            return false;
        };
        option.votes = option.votes.saturating_add(1);
        self.total_votes = self.total_votes.saturating_add(1);
        true
    }

    pub(crate) fn close(&mut self) {
        self.status = PollStatus::Closed;
    }

    pub fn info(&self) -> PollInfo {
        PollInfo {
            title: self.title.clone(),
            creator: self.creator.clone(),
            total_votes: self.total_votes,
            is_active: self.is_active(),
            option_count: self.option_count(),
        }
    }

    pub fn results(&self) -> PollResults {
        PollResults {
            title: self.title.clone(),
            total_votes: self.total_votes,
            is_active: self.is_active(),
            option_count: self.option_count(),
        }
    }
}

/// Answer to `get-poll-info`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PollInfo {
    pub title: Title,
    pub creator: Principal,
    pub total_votes: u64,
    pub is_active: bool,
    pub option_count: u64,
}

/// Answer to `get-poll-results`. Same as [`PollInfo`] without the creator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PollResults {
    pub title: Title,
    pub total_votes: u64,
    pub is_active: bool,
    pub option_count: u64,
}

/// Answer to `get-option-info`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionInfo {
    pub option_name: OptionName,
    pub votes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_poll() -> Poll {
        Poll::new(
            0,
            Title::new("Favourite colour").unwrap(),
            Principal::new("creator").unwrap(),
            ["Red", "Blue", "Green"]
                .into_iter()
                .map(|n| OptionName::new(n).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_new_poll_is_open_with_zero_tallies() {
        let poll = sample_poll();
        assert!(poll.is_active());
        assert_eq!(poll.option_count(), 3);
        assert_eq!(poll.total_votes(), 0);
        assert!(poll.options().iter().all(|o| o.votes == 0));
    }

    #[test]
    fn test_option_lookup_bounds() {
        let poll = sample_poll();
        assert_eq!(poll.option(2).unwrap().name.as_str(), "Green");
        assert!(poll.option(3).is_none());
        assert!(poll.option(u64::MAX).is_none());
    }

    #[test]
    fn test_tally_keeps_total_in_sync() {
        let mut poll = sample_poll();
        assert!(poll.tally(1));
        assert!(poll.tally(1));
        assert!(poll.tally(0));
        assert!(!poll.tally(9));
        let sum: u64 = poll.options().iter().map(|o| o.votes).sum();
        assert_eq!(poll.total_votes(), 3);
        assert_eq!(sum, poll.total_votes());
    }

    #[test]
    fn test_views_serialize_kebab_case() {
        let poll = sample_poll();
        let json = serde_json::to_value(poll.info()).unwrap();
        assert_eq!(json["total-votes"], 0);
        assert_eq!(json["is-active"], true);
        assert_eq!(json["option-count"], 3);
        assert_eq!(json["creator"], "creator");

        let json = serde_json::to_value(poll.results()).unwrap();
        assert!(json.get("creator").is_none());
    }
}
