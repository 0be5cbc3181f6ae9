use tally_types::Height;
use thiserror::Error;

/// Failures around the ledger state itself (snapshots, delivery order), as
/// opposed to [`tally_types::ContractError`], which rejects a single call.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("snapshot hash mismatch: payload has been altered")]
    HashMismatch,

    #[error("call height {incoming} precedes snapshot height {current}")]
    HeightRegression { current: Height, incoming: Height },
}
