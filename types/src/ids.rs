//! Poll and option identifiers.

/// Sequential poll identifier, assigned from 0 in creation order and never reused.
pub type PollId = u64;

/// Position of an option within its poll, in `0..option_count`.
pub type OptionIndex = u64;
