//! Local key/value storage for per-project node collections.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each project's nodes live under one key, `project_<id>_nodes`.
//! [`KeyValueStore`] is the whole surface: string keys, string values,
//! whole-value overwrite. [`MemoryStore`] backs tests and ephemeral
//! sessions; [`FileStore`] keeps one JSON file per key in a data directory.
//!
//! ERROR HANDLING
//! ==============
//! Reads treat malformed or missing state as absent: [`load_nodes`] logs a
//! warning and yields an empty collection. Writes surface [`StorageError`]
//! so callers can log them; nothing here is fatal.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use canvas::doc::Node;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),
    #[error("storage serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key/value storage with whole-value overwrite semantics.
pub trait KeyValueStore: Send {
    /// Read the value for `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` when the backing medium can't be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` when the backing medium can't be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` when the backing medium can't be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// MEMORY
// =============================================================================

/// In-process store; contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// Directory-backed store: one `<key>.json` file per key.
///
/// Keys are escaped so any string maps to a single file name. Writes go to a
/// temporary sibling first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory can't be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", escape_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Escape a key into a portable file stem: ASCII alphanumerics, `-` and `_`
/// pass through, every other byte becomes `%XX`.
fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

// =============================================================================
// NODE COLLECTIONS
// =============================================================================

/// Storage key for a project's node collection.
#[must_use]
pub fn nodes_key(project_id: &str) -> String {
    format!("project_{project_id}_nodes")
}

/// Load a project's nodes. Missing, unreadable, or malformed state yields
/// an empty collection.
#[must_use]
pub fn load_nodes(store: &dyn KeyValueStore, project_id: &str) -> Vec<Node> {
    let key = nodes_key(project_id);
    let raw = match store.get(&key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(%key, "no persisted nodes");
            return Vec::new();
        }
        Err(e) => {
            warn!(%key, error = %e, "failed to read persisted nodes; starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<Node>>(&raw) {
        Ok(nodes) => {
            debug!(%key, count = nodes.len(), "loaded persisted nodes");
            nodes
        }
        Err(e) => {
            warn!(%key, error = %e, "malformed persisted nodes; starting empty");
            Vec::new()
        }
    }
}

/// Overwrite a project's persisted nodes with `nodes`.
///
/// # Errors
///
/// Returns `StorageError` if serialization or the write fails.
pub fn save_nodes(store: &mut dyn KeyValueStore, project_id: &str, nodes: &[Node]) -> Result<(), StorageError> {
    let key = nodes_key(project_id);
    let raw = serde_json::to_string(nodes)?;
    store.set(&key, &raw)?;
    debug!(%key, count = nodes.len(), "saved nodes");
    Ok(())
}
