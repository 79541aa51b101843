//! Configuration: grid dimensions and the optional settings file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Smallest allowed row or column count.
pub const MIN_DIMENSION: u8 = 3;

/// Largest allowed row or column count.
pub const MAX_DIMENSION: u8 = 20;

/// Validated grid dimensions, both within `[MIN_DIMENSION, MAX_DIMENSION]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions", into = "RawDimensions")]
pub struct Dimensions {
    rows: u8,
    cols: u8,
}

impl Dimensions {
    /// Validate and build dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first out-of-range value.
    pub fn new(rows: u32, cols: u32) -> Result<Self, ConfigError> {
        let rows = checked(rows).ok_or(ConfigError::RowsOutOfRange(rows))?;
        let cols = checked(cols).ok_or(ConfigError::ColsOutOfRange(cols))?;
        Ok(Self { rows, cols })
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(self) -> u8 {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(self) -> u8 {
        self.cols
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self { rows: 8, cols: 8 }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

fn checked(value: u32) -> Option<u8> {
    let value = u8::try_from(value).ok()?;
    (MIN_DIMENSION..=MAX_DIMENSION).contains(&value).then_some(value)
}

/// Unvalidated dimensions as they appear on disk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct RawDimensions {
    rows: u32,
    cols: u32,
}

impl Default for RawDimensions {
    fn default() -> Self {
        Dimensions::default().into()
    }
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = ConfigError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Dimensions::new(raw.rows, raw.cols)
    }
}

impl From<Dimensions> for RawDimensions {
    fn from(dims: Dimensions) -> Self {
        Self {
            rows: u32::from(dims.rows),
            cols: u32::from(dims.cols),
        }
    }
}

/// Operator settings, read from a TOML file.
///
/// ```toml
/// seed = 42
/// profile_path = "/tmp/profile.json"
///
/// [grid]
/// rows = 10
/// cols = 12
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grid size for new levels.
    pub grid: Dimensions,
    /// Seed for the first level (random when absent).
    pub seed: Option<u64>,
    /// Where the profile lives (`~/.hexzoe/profile.json` when absent).
    pub profile_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// holds out-of-range dimensions.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error, including dimension validation failures.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Apply command-line overrides on top of file values.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting dimensions are out of range.
    pub fn with_overrides(
        mut self,
        rows: Option<u32>,
        cols: Option<u32>,
        seed: Option<u64>,
        profile_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if rows.is_some() || cols.is_some() {
            self.grid = Dimensions::new(
                rows.unwrap_or(u32::from(self.grid.rows())),
                cols.unwrap_or(u32::from(self.grid.cols())),
            )?;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        if profile_path.is_some() {
            self.profile_path = profile_path;
        }
        Ok(self)
    }
}
