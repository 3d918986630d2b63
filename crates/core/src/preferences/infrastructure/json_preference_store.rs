use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::preferences::domain::preference_store::PreferenceStore;

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to write preferences to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode preferences: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Preferences kept as a flat JSON object on disk.
///
/// A missing or unreadable file behaves like an empty one; the file is
/// rewritten in full on every `set`.
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonPreferenceStore {
    /// Store in the platform config directory, e.g.
    /// `~/.config/Subedit/preferences.json` on Linux.
    pub fn open_default() -> Result<Self, PreferenceError> {
        let path = dirs::config_dir()
            .map(|d| d.join("Subedit").join("preferences.json"))
            .ok_or(PreferenceError::NoConfigDir)?;
        Ok(Self::open(path))
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| PreferenceError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(&self.values).map_err(PreferenceError::Encode)?;
        fs::write(&self.path, json).map_err(|source| PreferenceError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()?;
        Ok(())
    }
}
