//! Election configuration with TOML file support.

use ballot_types::Address;
use ballot_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::DaemonError;

/// Configuration for one election run.
///
/// ```toml
/// owner = "0xowner"
/// voters = ["0xalice", "0xbob"]
/// log_format = "json"
/// log_level = "debug"
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElectionConfig {
    /// The administrator of the election.
    pub owner: Address,

    /// Addresses the owner whitelists before the script runs.
    #[serde(default)]
    pub voters: Vec<Address>,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ElectionConfig {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            voters: Vec::new(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DaemonError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| DaemonError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, DaemonError> {
        toml::from_str(s).map_err(|e| DaemonError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, DaemonError> {
        toml::to_string_pretty(self).map_err(|e| DaemonError::Config(e.to_string()))
    }
}
