//! CLI command implementations for hexzoe.

pub(crate) mod generate;
pub(crate) mod play;
pub(crate) mod profile;

mod output;

use clap::ValueEnum;
use hexzoe::progression::{data_dir, JsonFileStore};
use hexzoe::{ConfigError, Settings, StoreError};
use std::error::Error;
use std::fmt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// File the TUI logs to, under the data directory.
const LOG_FILE: &str = "hexzoe.log";

/// Output format for the `generate` and `profile` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Grid and profile options shared by several commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct GridArgs {
    /// Settings file (TOML)
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Grid rows (3-20, default: 8)
    #[arg(short, long)]
    pub(crate) rows: Option<u32>,

    /// Grid columns (3-20, default: 8)
    #[arg(long)]
    pub(crate) cols: Option<u32>,

    /// Random seed (default: random)
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,

    /// Profile file (default: ~/.hexzoe/profile.json)
    #[arg(short, long)]
    pub(crate) profile: Option<PathBuf>,
}

impl GridArgs {
    /// Read the settings file, if any, and apply the flags on top.
    pub(crate) fn settings(&self) -> Result<Settings, CliError> {
        let base = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        Ok(base.with_overrides(self.rows, self.cols, self.seed, self.profile.clone())?)
    }
}

/// Seed from settings, or one derived from the clock.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}

/// Profile store for the settings' profile path.
pub(crate) fn open_store(settings: &Settings) -> Result<JsonFileStore, CliError> {
    match &settings.profile_path {
        Some(path) => Ok(JsonFileStore::new(path)),
        None => Ok(JsonFileStore::at_default_path()?),
    }
}

/// Install the logger. `RUST_LOG` controls the level (default `info`).
///
/// With `to_file` the log goes to `~/.hexzoe/hexzoe.log` so it does not
/// scribble over the TUI.
pub(crate) fn init_logging(to_file: bool) -> Result<(), CliError> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if to_file {
        let path = data_dir()?.join(LOG_FILE);
        builder.target(env_logger::Target::Pipe(Box::new(open_log(&path)?)));
    }
    builder
        .try_init()
        .map_err(|e| CliError::new(format!("Failed to install logger: {e}")))
}

fn open_log(path: &Path) -> Result<std::fs::File, CliError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::new(format!("Failed to open log {}: {e}", path.display())))
}
