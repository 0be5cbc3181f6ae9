//! Poll registry: append-only, sequentially identified polls.

use serde::{Deserialize, Serialize};
use tally_types::{ContractError, OptionIndex, OptionName, PollId, Principal, Title};

use crate::poll::{OptionInfo, Poll, PollInfo, PollResults};
use crate::votes::VoteLedger;

/// All polls ever created. A poll's id is its position, so ids are dense,
/// start at 0 and are never reused.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollRegistry {
    polls: Vec<Poll>,
}

impl PollRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of polls ever created, which is also the next id to be assigned.
    pub fn total_polls(&self) -> u64 {
        self.polls.len() as u64
    }

    pub fn get(&self, poll_id: PollId) -> Option<&Poll> {
        usize::try_from(poll_id).ok().and_then(|i| self.polls.get(i))
    }

    fn get_mut(&mut self, poll_id: PollId) -> Option<&mut Poll> {
        usize::try_from(poll_id).ok().and_then(|i| self.polls.get_mut(i))
    }

    /// Create a poll owned by `creator` and return its id.
    ///
    /// Fails only when `options` is empty; the id counter is not advanced then.
    pub fn create_poll(
        &mut self,
        title: Title,
        options: Vec<OptionName>,
        creator: Principal,
    ) -> Result<PollId, ContractError> {
        if options.is_empty() {
            return Err(ContractError::EmptyOptions);
        }
        let id = self.total_polls();
        tracing::trace!(poll_id = id, options = options.len(), "allocating poll");
        self.polls.push(Poll::new(id, title, creator, options));
        Ok(id)
    }

    /// Cast `voter`'s single vote on `poll_id` for `option`.
    ///
    /// Checks run in a fixed order and the first failure wins: existence, open,
    /// not yet voted, option in range. Nothing is mutated unless all pass.
    pub fn cast_vote(
        &mut self,
        votes: &mut VoteLedger,
        poll_id: PollId,
        option: OptionIndex,
        voter: &Principal,
    ) -> Result<(), ContractError> {
        let poll = self.get_mut(poll_id).ok_or(ContractError::PollNotFound)?;
        if !poll.is_active() {
            return Err(ContractError::PollClosed);
        }
        if votes.has_voted(poll_id, voter) {
            return Err(ContractError::AlreadyVoted);
        }
        if option >= poll.option_count() || !poll.tally(option) {
            return Err(ContractError::InvalidOption);
        }
        votes.record(poll_id, voter.clone());
        Ok(())
    }

    /// Close `poll_id` on behalf of `caller` and return the final total.
    pub fn close_poll(
        &mut self,
        poll_id: PollId,
        caller: &Principal,
    ) -> Result<u64, ContractError> {
        let poll = self.get_mut(poll_id).ok_or(ContractError::PollNotFound)?;
        if poll.creator != *caller {
            return Err(ContractError::Unauthorized);
        }
        if !poll.is_active() {
            return Err(ContractError::PollClosed);
        }
        poll.close();
        Ok(poll.total_votes())
    }

    pub fn poll_info(&self, poll_id: PollId) -> Result<PollInfo, ContractError> {
        self.get(poll_id)
            .map(Poll::info)
            .ok_or(ContractError::PollNotFound)
    }

    pub fn poll_results(&self, poll_id: PollId) -> Result<PollResults, ContractError> {
        self.get(poll_id)
            .map(Poll::results)
            .ok_or(ContractError::PollNotFound)
    }

    pub fn option_info(
        &self,
        poll_id: PollId,
        index: OptionIndex,
    ) -> Result<OptionInfo, ContractError> {
        let poll = self.get(poll_id).ok_or(ContractError::PollNotFound)?;
        let option = poll.option(index).ok_or(ContractError::InvalidOption)?;
        Ok(OptionInfo {
            option_name: option.name.clone(),
            votes: option.votes,
        })
    }

    pub fn option_votes(&self, poll_id: PollId, index: OptionIndex) -> Result<u64, ContractError> {
        self.option_info(poll_id, index).map(|o| o.votes)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Poll> {
        self.polls.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn who(name: &str) -> Principal {
        Principal::new(name).unwrap()
    }

    fn options(names: &[&str]) -> Vec<OptionName> {
        names.iter().map(|n| OptionName::new(*n).unwrap()).collect()
    }

    fn registry_with_poll(creator: &str) -> (PollRegistry, VoteLedger, PollId) {
        let mut registry = PollRegistry::new();
        let id = registry
            .create_poll(
                Title::new("Colour").unwrap(),
                options(&["Red", "Blue", "Green"]),
                who(creator),
            )
            .unwrap();
        (registry, VoteLedger::new(), id)
    }

    #[test]
    fn test_ids_are_sequential_across_creators() {
        let mut registry = PollRegistry::new();
        for (expected, creator) in ["a", "b", "a", "c"].iter().enumerate() {
            let id = registry
                .create_poll(Title::new("q").unwrap(), options(&["x"]), who(creator))
                .unwrap();
            assert_eq!(id, expected as u64);
        }
        assert_eq!(registry.total_polls(), 4);
    }

    #[test]
    fn test_empty_options_does_not_advance_id() {
        let mut registry = PollRegistry::new();
        let err = registry
            .create_poll(Title::new("q").unwrap(), vec![], who("a"))
            .unwrap_err();
        assert_eq!(err, ContractError::EmptyOptions);
        assert_eq!(registry.total_polls(), 0);

        let id = registry
            .create_poll(Title::new("q").unwrap(), options(&["x"]), who("a"))
            .unwrap();
        assert_eq!(id, 0);
    }

    #[test]
    fn test_vote_check_order_missing_poll_first() {
        let mut registry = PollRegistry::new();
        let mut votes = VoteLedger::new();
        let err = registry.cast_vote(&mut votes, 999, 999, &who("a")).unwrap_err();
        assert_eq!(err, ContractError::PollNotFound);
    }

    #[test]
    fn test_vote_check_order_closed_before_already_voted() {
        let (mut registry, mut votes, id) = registry_with_poll("owner");
        registry.cast_vote(&mut votes, id, 0, &who("alice")).unwrap();
        registry.close_poll(id, &who("owner")).unwrap();
        let err = registry.cast_vote(&mut votes, id, 0, &who("alice")).unwrap_err();
        assert_eq!(err, ContractError::PollClosed);
    }

    #[test]
    fn test_vote_check_order_already_voted_before_invalid_option() {
        let (mut registry, mut votes, id) = registry_with_poll("owner");
        registry.cast_vote(&mut votes, id, 0, &who("alice")).unwrap();
        let err = registry.cast_vote(&mut votes, id, 999, &who("alice")).unwrap_err();
        assert_eq!(err, ContractError::AlreadyVoted);
    }

    #[test]
    fn test_invalid_option_leaves_no_record() {
        let (mut registry, mut votes, id) = registry_with_poll("owner");
        let err = registry.cast_vote(&mut votes, id, 3, &who("alice")).unwrap_err();
        assert_eq!(err, ContractError::InvalidOption);
        assert!(!votes.has_voted(id, &who("alice")));
        assert_eq!(registry.poll_info(id).unwrap().total_votes, 0);

        // The identity may still vote for a valid option afterwards.
        registry.cast_vote(&mut votes, id, 2, &who("alice")).unwrap();
        assert_eq!(registry.option_votes(id, 2).unwrap(), 1);
    }

    #[test]
    fn test_close_requires_creator_even_after_votes() {
        let (mut registry, mut votes, id) = registry_with_poll("owner");
        registry.cast_vote(&mut votes, id, 1, &who("alice")).unwrap();
        assert_eq!(
            registry.close_poll(id, &who("alice")),
            Err(ContractError::Unauthorized)
        );
        assert!(registry.poll_info(id).unwrap().is_active);
    }

    #[test]
    fn test_close_is_terminal() {
        let (mut registry, mut votes, id) = registry_with_poll("owner");
        registry.cast_vote(&mut votes, id, 1, &who("alice")).unwrap();
        assert_eq!(registry.close_poll(id, &who("owner")), Ok(1));
        assert_eq!(
            registry.close_poll(id, &who("owner")),
            Err(ContractError::PollClosed)
        );
        assert!(!registry.poll_info(id).unwrap().is_active);
    }

    #[test]
    fn test_close_check_order_unauthorized_before_closed() {
        let (mut registry, _votes, id) = registry_with_poll("owner");
        registry.close_poll(id, &who("owner")).unwrap();
        assert_eq!(
            registry.close_poll(id, &who("mallory")),
            Err(ContractError::Unauthorized)
        );
    }

    #[test]
    fn test_close_missing_poll() {
        let mut registry = PollRegistry::new();
        assert_eq!(
            registry.close_poll(0, &who("owner")),
            Err(ContractError::PollNotFound)
        );
    }

    #[test]
    fn test_option_queries() {
        let (registry, _votes, id) = registry_with_poll("owner");
        let info = registry.option_info(id, 1).unwrap();
        assert_eq!(info.option_name.as_str(), "Blue");
        assert_eq!(info.votes, 0);
        assert_eq!(registry.option_info(id, 3), Err(ContractError::InvalidOption));
        assert_eq!(registry.option_votes(7, 0), Err(ContractError::PollNotFound));
    }

    #[test]
    fn test_results_omit_creator() {
        let (registry, _votes, id) = registry_with_poll("owner");
        let info = registry.poll_info(id).unwrap();
        let results = registry.poll_results(id).unwrap();
        assert_eq!(info.creator.as_str(), "owner");
        assert_eq!(results.title, info.title);
        assert_eq!(results.option_count, 3);
        assert_eq!(registry.poll_results(5), Err(ContractError::PollNotFound));
    }
}
