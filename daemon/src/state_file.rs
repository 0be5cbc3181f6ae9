//! Loading and saving the ledger snapshot between invocations.

use anyhow::Context;
use std::path::{Path, PathBuf};
use tally_ledger::LedgerSnapshot;

/// Load the snapshot at `path`, or genesis if the file does not exist yet.
pub fn load_or_genesis(path: &Path) -> anyhow::Result<LedgerSnapshot> {
    if !path.exists() {
        tracing::info!("no snapshot at {}, starting from genesis", path.display());
        return Ok(LedgerSnapshot::genesis()?);
    }
    load(path)
}

pub fn load(path: &Path) -> anyhow::Result<LedgerSnapshot> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let snap = LedgerSnapshot::from_bytes(&bytes)
        .with_context(|| format!("decoding snapshot {}", path.display()))?;
    tracing::debug!(height = %snap.height, hash = %snap.hash_hex(), "snapshot loaded");
    Ok(snap)
}

/// Sibling path the snapshot is written to before the rename: the full file
/// name with `.tmp` appended, so it never equals `path`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Written via a sibling temp file and a rename.
pub fn save(path: &Path, snap: &LedgerSnapshot) -> anyhow::Result<()> {
    let tmp = temp_path(path);
    std::fs::write(&tmp, snap.to_bytes()?).with_context(|| format!("writing {}", tmp.display()))?;
    std::fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
    tracing::debug!(height = %snap.height, hash = %snap.hash_hex(), "snapshot saved");
    Ok(())
}
