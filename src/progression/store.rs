//! Profile persistence.
//!
//! The engine only sees the [`ProfileStore`] capability. The JSON file store
//! keeps the profile as one pretty-printed record under `~/.hexzoe`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::progression::Profile;

/// Load/save capability for the persistent profile.
pub trait ProfileStore {
    /// Load the stored profile, or `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if stored data exists but cannot be read.
    fn load(&mut self) -> Result<Option<Profile>, StoreError>;

    /// Save the profile, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be written.
    fn save(&mut self, profile: &Profile) -> Result<(), StoreError>;
}

/// Name of the data directory under the home directory.
const DATA_SUBDIR: &str = ".hexzoe";

/// File name of the default profile.
const PROFILE_FILE: &str = "profile.json";

/// Get the path to the hexzoe data directory (`~/.hexzoe`).
///
/// Creates the directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined or directory creation fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| StoreError::NoHomeDir)?;

    let dir = Path::new(&home).join(DATA_SUBDIR);
    fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Path of the default profile file (`~/.hexzoe/profile.json`).
///
/// # Errors
///
/// Returns an error if the data directory is unavailable.
pub fn default_profile_path() -> Result<PathBuf, StoreError> {
    Ok(data_dir()?.join(PROFILE_FILE))
}

/// Profile stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by `~/.hexzoe/profile.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory is unavailable.
    pub fn at_default_path() -> Result<Self, StoreError> {
        Ok(Self::new(default_profile_path()?))
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ProfileStore for JsonFileStore {
    fn load(&mut self) -> Result<Option<Profile>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let profile = serde_json::from_str(&text)?;
        Ok(Some(profile))
    }

    fn save(&mut self, profile: &Profile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }
}

/// Profile kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    profile: Option<Profile>,
    saves: usize,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds a profile.
    #[must_use]
    pub fn with_profile(profile: Profile) -> Self {
        Self {
            profile: Some(profile),
            saves: 0,
        }
    }

    /// The last saved profile.
    #[must_use]
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Number of saves so far.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ProfileStore for MemoryStore {
    fn load(&mut self) -> Result<Option<Profile>, StoreError> {
        Ok(self.profile.clone())
    }

    fn save(&mut self, profile: &Profile) -> Result<(), StoreError> {
        self.profile = Some(profile.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::TraitId;
    use tempfile::tempdir;

    #[test]
    fn test_json_store_roundtrip() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("profile.json"));

        let mut profile = Profile::default();
        profile.xp = 70;
        profile.grant(TraitId::Explorer);
        profile.trait_affinities.insert(TraitId::Explorer, 64.5);

        store.save(&profile).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_json_store_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_json_store_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, b"{ not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_json_store_uses_camel_case_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profile.json");
        let mut store = JsonFileStore::new(&path);
        store.save(&Profile::default()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"traitAffinities\""));
        assert!(text.contains("\"generationHistory\""));
        assert!(text.contains("\"movementRange\""));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&Profile::default()).unwrap();
        assert_eq!(store.saves(), 1);
        assert!(store.load().unwrap().is_some());
    }
}
