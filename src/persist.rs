//! JSON files for the saved tuner state and user presets.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_types::Preset;
use crate::state::{SavedState, StateStore};

/// File name used when no state path is given.
pub const DEFAULT_STATE_FILE: &str = "tea5767.json";

/// Errors reading or writing the state and preset files.
#[derive(Debug, Error)]
pub enum PersistError {
    /// File could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not the expected JSON.
    #[error("malformed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Record could not be encoded.
    #[error("cannot encode state for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Saved state kept in a JSON file.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file strictly.
    pub fn read(&self) -> Result<SavedState, PersistError> {
        let text = fs::read_to_string(&self.path).map_err(|source| PersistError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| PersistError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Read the file, falling back to defaults when it is missing or unreadable.
    ///
    /// Individual missing fields take their defaults without failing the whole record.
    pub fn load(&self) -> SavedState {
        match self.read() {
            Ok(state) => {
                log::debug!("loaded state from {}: {:?}", self.path.display(), state);
                state
            }
            Err(PersistError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no state file at {}, starting from defaults", self.path.display());
                SavedState::default()
            }
            Err(e) => {
                log::warn!("{}; starting from defaults", e);
                SavedState::default()
            }
        }
    }

    /// Write the record, replacing the file.
    pub fn write(&self, state: &SavedState) -> Result<(), PersistError> {
        let text = serde_json::to_string_pretty(state).map_err(|source| PersistError::Serialize {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, text).map_err(|source| PersistError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("saved state to {}", self.path.display());
        Ok(())
    }
}

impl Default for StateFile {
    fn default() -> Self {
        Self::new(DEFAULT_STATE_FILE)
    }
}

impl StateStore for StateFile {
    type Error = PersistError;

    fn save(&mut self, state: &SavedState) -> Result<(), Self::Error> {
        self.write(state)
    }
}

/// One preset as stored in a presets file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetEntry {
    pub ident: String,
    pub frequency_hz: u32,
}

impl PresetEntry {
    pub fn as_preset(&self) -> Preset<'_> {
        Preset::new(&self.ident, self.frequency_hz)
    }
}

/// Read a JSON array of presets. Ordering is checked later by [`crate::presets::FrequencyTable`].
pub fn load_presets(path: &Path) -> Result<Vec<PresetEntry>, PersistError> {
    let text = fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| PersistError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
