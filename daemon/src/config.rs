//! Daemon configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tally_types::Principal;
use tally_utils::LogFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Configuration for the `tally` driver.
///
/// Can be loaded from a TOML file via [`DaemonConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Where the ledger snapshot is kept between invocations.
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Caller used when `--caller` is not given.
    #[serde(default)]
    pub default_caller: Option<Principal>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_state_path() -> PathBuf {
    PathBuf::from("./tally_state.bin")
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DaemonConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            default_caller: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = DaemonConfig::from_toml_str("").unwrap();
        assert_eq!(config, DaemonConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = DaemonConfig::from_toml_str(
            r#"
            state_path = "/var/lib/tally/state.bin"
            log_format = "json"
            default_caller = "ST1OPERATOR"
            "#,
        )
        .unwrap();
        assert_eq!(config.state_path, PathBuf::from("/var/lib/tally/state.bin"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.default_caller.unwrap().as_str(), "ST1OPERATOR");
    }

    #[test]
    fn test_invalid_caller_is_a_parse_error() {
        let err = DaemonConfig::from_toml_str(r#"default_caller = """#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = DaemonConfig {
            default_caller: Some(Principal::new("alice").unwrap()),
            ..DaemonConfig::default()
        };
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(DaemonConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();
        let config = DaemonConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.log_level, "debug");

        let missing = DaemonConfig::from_toml_file(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
