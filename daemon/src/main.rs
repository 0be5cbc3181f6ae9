//! tally: applies calls and queries to a ledger snapshot on disk.
//!
//! This is a delivery adapter: each invocation hands the ledger one call (or
//! a script of calls) with an explicit caller and height, prints the outcome
//! as JSON on stdout, and persists the resulting state.

mod commands;
mod config;
mod state_file;

use clap::Parser;
use config::DaemonConfig;
use std::io::Write;
use std::path::PathBuf;
use tally_types::{Height, Principal};
use tally_utils::LogFormat;

#[derive(Parser)]
#[command(name = "tally", about = "Counter and poll ledger driver")]
struct Cli {
    /// Snapshot file holding the ledger state.
    #[arg(long, env = "TALLY_STATE")]
    state: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "TALLY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "TALLY_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "TALLY_CONFIG")]
    config: Option<PathBuf>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Write a genesis snapshot.
    Init {
        /// Overwrite an existing snapshot.
        #[arg(long)]
        force: bool,
    },
    /// Apply one mutating call, e.g. '{"function":"vote","poll-id":0,"option-index":1}'.
    Call {
        /// Caller identity (defaults to the config's `default_caller`).
        #[arg(long, env = "TALLY_CALLER")]
        caller: Option<Principal>,
        /// Height at which the call is delivered.
        #[arg(long)]
        height: u64,
        /// The call as JSON.
        call: String,
    },
    /// Answer a read-only query, e.g. '{"function":"get-poll-info","poll-id":0}'.
    Query {
        /// The query as JSON.
        query: String,
    },
    /// Apply a JSON-lines script of `{"caller", "height", "call"}` records in order.
    Replay {
        /// Script file.
        script: PathBuf,
    },
    /// Print the snapshot height, hash and headline totals.
    Status,
    /// Print the effective configuration as TOML.
    Config,
}

fn load_config(cli: &Cli) -> anyhow::Result<DaemonConfig> {
    let mut config = match &cli.config {
        Some(path) => DaemonConfig::from_toml_file(path)?,
        None => DaemonConfig::default(),
    };
    if let Some(state) = &cli.state {
        config.state_path = state.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    tally_utils::init_tracing(&config.log_level, config.log_format)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::Init { force } => commands::init(&config, force)?,
        Command::Call {
            caller,
            height,
            call,
        } => commands::call(&config, caller, Height::new(height), &call, &mut out)?,
        Command::Query { query } => commands::query(&config, &query, &mut out)?,
        Command::Replay { script } => {
            commands::replay(&config, &script, &mut out)?;
        }
        Command::Status => commands::status(&config, &mut out)?,
        Command::Config => write!(out, "{}", config.to_toml_string()?)?,
    }

    Ok(())
}
