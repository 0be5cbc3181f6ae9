//! Subcommand handlers. Each one loads the snapshot named by the config,
//! writes its JSON answer to `out`, and saves state where the command mutates.

use crate::config::DaemonConfig;
use crate::state_file;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tally_ledger::{Call, CallContext, ContractError, LedgerSnapshot, Query, Response};
use tally_types::{Height, Principal};

/// One line of a replay script.
#[derive(Deserialize)]
struct ScriptEntry {
    caller: Principal,
    height: Height,
    call: Call,
}

/// Stdout form of a query answer: `{"ok": …}` or `{"err": 101}`.
#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum QueryReply {
    Ok(Response),
    Err(ContractError),
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct Status {
    height: Height,
    hash: String,
    counter: u128,
    total_polls: u64,
    vote_records: usize,
}

pub fn init(config: &DaemonConfig, force: bool) -> anyhow::Result<()> {
    if config.state_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config.state_path.display()
        );
    }
    let snap = LedgerSnapshot::genesis()?;
    state_file::save(&config.state_path, &snap)?;
    tracing::info!("genesis snapshot written to {}", config.state_path.display());
    Ok(())
}

/// Apply one call. State is saved only when the call succeeds.
pub fn call(
    config: &DaemonConfig,
    caller: Option<Principal>,
    height: Height,
    call: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let caller = caller
        .or_else(|| config.default_caller.clone())
        .context("no --caller given and no default_caller configured")?;
    let call: Call = serde_json::from_str(call).context("decoding call")?;
    let mut snap = state_file::load_or_genesis(&config.state_path)?;
    let outcome = snap.apply(call, &CallContext::new(caller, height))?;
    writeln!(out, "{}", serde_json::to_string(&outcome)?)?;
    if outcome.is_ok() {
        state_file::save(&config.state_path, &snap)?;
    }
    Ok(())
}

pub fn query(config: &DaemonConfig, query: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let query: Query = serde_json::from_str(query).context("decoding query")?;
    let snap = state_file::load_or_genesis(&config.state_path)?;
    let reply = match snap.state.query(&query) {
        Ok(value) => QueryReply::Ok(value),
        Err(error) => QueryReply::Err(error),
    };
    writeln!(out, "{}", serde_json::to_string(&reply)?)?;
    Ok(())
}

/// Apply a JSON-lines script in order.
///
/// Whatever was applied before a failing line (bad JSON, read error, height
/// regression) is saved before the error is returned, so every outcome
/// already written to `out` is reflected on disk.
pub fn replay(
    config: &DaemonConfig,
    script: &Path,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let file =
        std::fs::File::open(script).with_context(|| format!("opening {}", script.display()))?;
    let mut snap = state_file::load_or_genesis(&config.state_path)?;
    let result = replay_lines(&mut snap, BufReader::new(file), script, out);
    state_file::save(&config.state_path, &snap)?;
    let applied = result?;
    tracing::info!(applied, height = %snap.height, "replay finished");
    Ok(applied)
}

fn replay_lines(
    snap: &mut LedgerSnapshot,
    reader: impl BufRead,
    script: &Path,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let mut applied = 0usize;
    for (n, line) in reader.lines().enumerate() {
        let at = || format!("{}:{}", script.display(), n + 1);
        let line = line.with_context(at)?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: ScriptEntry = serde_json::from_str(&line).with_context(at)?;
        let ctx = CallContext::new(entry.caller, entry.height);
        let outcome = snap.apply(entry.call, &ctx).with_context(at)?;
        writeln!(out, "{}", serde_json::to_string(&outcome)?)?;
        applied += 1;
    }
    Ok(applied)
}

pub fn status(config: &DaemonConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let snap = state_file::load_or_genesis(&config.state_path)?;
    let status = Status {
        height: snap.height,
        hash: snap.hash_hex(),
        counter: snap.state.get_counter(),
        total_polls: snap.state.get_total_polls(),
        vote_records: snap.state.votes().record_count(),
    };
    writeln!(out, "{}", serde_json::to_string(&status)?)?;
    Ok(())
}
