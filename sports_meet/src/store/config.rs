//! Snapshot store configuration.

use std::{env, path::PathBuf};

/// Default directory for the snapshot files
pub const DEFAULT_DATA_DIR: &str = "meet_data";

/// Snapshot store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding `participants.json`, `sports.json` and `matches.json`
    pub data_dir: PathBuf,

    /// Write human-readable JSON
    pub pretty: bool,
}

impl StoreConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `MEET_DATA_DIR`: snapshot directory (default: `meet_data`)
    /// - `MEET_PRETTY_JSON`: write indented JSON (default: true)
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("MEET_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            pretty: env::var("MEET_PRETTY_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            pretty: true,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_dir(DEFAULT_DATA_DIR)
    }
}
