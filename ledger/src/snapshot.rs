//! Ledger snapshots: the whole state captured after a given height.
//!
//! A snapshot lets the state outlive one process: the driver loads it, applies
//! a call, and writes it back. The hash is Blake2b-256 over the canonical
//! bincode encoding of the state plus the height, so a loaded snapshot can be
//! checked for tampering or truncation.

use serde::{Deserialize, Serialize};
use tally_types::Height;

use crate::call::{Call, CallContext, CallOutcome};
use crate::error::LedgerError;
use crate::state::LedgerState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Blake2b-256 of `state` and `height`.
    pub hash: [u8; 32],
    /// Height of the last call applied to `state`.
    pub height: Height,
    pub state: LedgerState,
}

impl LedgerSnapshot {
    /// Snapshot of the genesis state at height 0.
    pub fn genesis() -> Result<Self, LedgerError> {
        Self::create(LedgerState::genesis(), Height::GENESIS)
    }

    pub fn create(state: LedgerState, height: Height) -> Result<Self, LedgerError> {
        let hash = compute_hash(&state, height)?;
        Ok(Self {
            hash,
            height,
            state,
        })
    }

    /// Verify the snapshot hash matches the state.
    pub fn verify(&self) -> bool {
        compute_hash(&self.state, self.height).is_ok_and(|h| h == self.hash)
    }

    /// Apply one delivered call on top of this snapshot.
    ///
    /// Calls must arrive at a height not lower than the snapshot's. The state,
    /// height and hash only move when the call succeeds.
    pub fn apply(&mut self, call: Call, ctx: &CallContext) -> Result<CallOutcome, LedgerError> {
        if !ctx.height.follows(self.height) {
            return Err(LedgerError::HeightRegression {
                current: self.height,
                incoming: ctx.height,
            });
        }
        let outcome = self.state.execute(call, ctx);
        if outcome.is_ok() {
            self.height = ctx.height;
            self.hash = compute_hash(&self.state, self.height)?;
        }
        Ok(outcome)
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize a snapshot and check its hash.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        let snap: Self = bincode::deserialize(bytes)?;
        if !snap.verify() {
            return Err(LedgerError::HashMismatch);
        }
        Ok(snap)
    }

    /// Hex form of the hash, for logs.
    pub fn hash_hex(&self) -> String {
        self.hash.iter().map(|b| format!("{b:02x}")).collect()
    }
}

fn compute_hash(state: &LedgerState, height: Height) -> Result<[u8; 32], LedgerError> {
    use blake2::digest::consts::U32;
    use blake2::{Blake2b, Digest};

    let mut hasher = Blake2b::<U32>::new();
    hasher.update(bincode::serialize(state)?);
    hasher.update(height.as_u64().to_le_bytes());

    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    Ok(out)
}
