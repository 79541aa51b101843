//! Error types for hexzoe.
//!
//! Only configuration and profile storage can fail. Gameplay never errors:
//! an invalid intent is a rejected no-op and running out of energy loses the
//! level.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Row count outside the supported range.
    #[error("rows must be between 3 and 20, got {0}")]
    RowsOutOfRange(u32),
    /// Column count outside the supported range.
    #[error("columns must be between 3 and 20, got {0}")]
    ColsOutOfRange(u32),
    /// The settings file could not be read.
    #[error("failed to read settings {path}: {source}")]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The settings file is not valid TOML for the settings schema.
    #[error("failed to parse settings {path}: {source}")]
    Parse {
        /// File that was being parsed.
        path: PathBuf,
        /// Underlying parse error.
        source: toml::de::Error,
    },
}

/// Profile storage failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the profile file failed.
    #[error("profile I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The profile file is not valid JSON.
    #[error("profile JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// No home directory to place the default profile in.
    #[error("cannot determine home directory")]
    NoHomeDir,
}
