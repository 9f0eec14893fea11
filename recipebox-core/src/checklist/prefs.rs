//! Local key-value preference storage.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode preference value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String-keyed, string-valued persistent map local to one client.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;

    fn remove(&self, key: &str) -> Result<(), PreferenceError>;
}

/// Preferences kept in a single JSON object file.
///
/// A missing or unparsable file reads as an empty map, so the next write
/// replaces a corrupt file. Every write rewrites the file.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub const FILE_NAME: &'static str = "preferences.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Preferences file inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(
                    "Ignoring corrupt preferences file {}: {}",
                    self.path.display(),
                    e
                );
                BTreeMap::new()
            })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(PreferenceError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write_all(&self, map: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        let io_err = |source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, content).map_err(io_err)
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut map = self.read_all()?;
        map.insert(key.to_string(), value.to_string());
        self.write_all(&map)
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        let mut map = self.read_all()?;
        if map.remove(key).is_some() {
            self.write_all(&map)?;
        }
        Ok(())
    }
}

/// In-process preferences; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned map is still a usable map.
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.values().remove(key);
        Ok(())
    }
}
