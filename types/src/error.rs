//! Error types shared across crates.
//!
//! [`ContractError`] is the only failure channel of the ledger's entry points.
//! Its numeric codes are part of the external interface and must never change.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rejected entry-point call. The discriminant is the wire code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
#[repr(u32)]
pub enum ContractError {
    #[error("counter cannot be decremented below zero")]
    Underflow = 100,

    #[error("poll not found")]
    PollNotFound = 101,

    #[error("poll is closed")]
    PollClosed = 102,

    #[error("caller has already voted on this poll")]
    AlreadyVoted = 103,

    #[error("option index out of range for this poll")]
    InvalidOption = 104,

    #[error("only the poll creator may do this")]
    Unauthorized = 105,

    #[error("a poll needs at least one option")]
    EmptyOptions = 106,
}

/// Broad category of a [`ContractError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An id or index that does not exist.
    NotFound,
    /// Valid in general, but not in the poll's current state or history.
    StateConflict,
    /// Caller lacks the required relationship to the poll.
    Authorization,
    /// Structurally invalid input.
    InputValidation,
    /// Would violate a non-negativity invariant.
    ArithmeticGuard,
}

impl ContractError {
    pub const ALL: [ContractError; 7] = [
        Self::Underflow,
        Self::PollNotFound,
        Self::PollClosed,
        Self::AlreadyVoted,
        Self::InvalidOption,
        Self::Unauthorized,
        Self::EmptyOptions,
    ];

    /// Numeric code reported to external callers.
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn kind(self) -> ErrorKind {
        match self {
            Self::PollNotFound | Self::InvalidOption => ErrorKind::NotFound,
            Self::PollClosed | Self::AlreadyVoted => ErrorKind::StateConflict,
            Self::Unauthorized => ErrorKind::Authorization,
            Self::EmptyOptions => ErrorKind::InputValidation,
            Self::Underflow => ErrorKind::ArithmeticGuard,
        }
    }
}

impl From<ContractError> for u32 {
    fn from(e: ContractError) -> Self {
        e.code()
    }
}

impl TryFrom<u32> for ContractError {
    type Error = TypesError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|e| e.code() == code)
            .ok_or(TypesError::UnknownErrorCode(code))
    }
}

/// Input that cannot be represented as a ledger value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("{field} is {len} characters, maximum is {max}")]
    TextTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("principal must not be empty")]
    EmptyPrincipal,

    #[error("invalid principal: {0:?}")]
    InvalidPrincipal(String),

    #[error("unknown error code {0}")]
    UnknownErrorCode(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ContractError::Underflow.code(), 100);
        assert_eq!(ContractError::PollNotFound.code(), 101);
        assert_eq!(ContractError::PollClosed.code(), 102);
        assert_eq!(ContractError::AlreadyVoted.code(), 103);
        assert_eq!(ContractError::InvalidOption.code(), 104);
        assert_eq!(ContractError::Unauthorized.code(), 105);
        assert_eq!(ContractError::EmptyOptions.code(), 106);
    }

    #[test]
    fn test_code_lookup() {
        for e in ContractError::ALL {
            assert_eq!(ContractError::try_from(e.code()), Ok(e));
        }
        assert_eq!(
            ContractError::try_from(107),
            Err(TypesError::UnknownErrorCode(107))
        );
    }

    #[test]
    fn test_serializes_as_code() {
        assert_eq!(
            serde_json::to_string(&ContractError::AlreadyVoted).unwrap(),
            "103"
        );
        let e: ContractError = serde_json::from_str("104").unwrap();
        assert_eq!(e, ContractError::InvalidOption);
    }

    #[test]
    fn test_taxonomy() {
        assert_eq!(ContractError::InvalidOption.kind(), ErrorKind::NotFound);
        assert_eq!(ContractError::AlreadyVoted.kind(), ErrorKind::StateConflict);
        assert_eq!(ContractError::Unauthorized.kind(), ErrorKind::Authorization);
        assert_eq!(ContractError::EmptyOptions.kind(), ErrorKind::InputValidation);
        assert_eq!(ContractError::Underflow.kind(), ErrorKind::ArithmeticGuard);
    }
}
