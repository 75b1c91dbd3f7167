//! File-backed [`SessionStore`] so bypass sessions survive process restarts.
//!
//! The in-memory cache is authoritative; every write is flushed to disk
//! best-effort. A failed or slow flush logs a warning and never fails the
//! caller — a broken disk downgrades persistence, not authentication.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use buildcrm_auth::SessionStore;

/// Key/value session store persisted as a single JSON object on disk.
#[derive(Debug)]
pub struct JsonFileSessionStore {
    path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl JsonFileSessionStore {
    /// Open a store at `path`, loading any existing entries.
    ///
    /// A missing file starts empty; a corrupt file is discarded with a
    /// warning (the session layer recovers per its own downgrade rules).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(error) => {
                    tracing::warn!(%error, path = %path.display(), "corrupt session file; starting empty");
                    HashMap::new()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(error) => {
                tracing::warn!(%error, path = %path.display(), "cannot read session file; starting empty");
                HashMap::new()
            }
        };

        Self {
            path,
            cache: RwLock::new(cache),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, map: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = fs::create_dir_all(parent);
            }
        }

        let json = match serde_json::to_string(map) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%error, "failed to serialize session file");
                return;
            }
        };

        if let Err(error) = fs::write(&self.path, json) {
            tracing::warn!(%error, path = %self.path.display(), "failed to write session file");
        }
    }
}

impl SessionStore for JsonFileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        let map = self.cache.read().ok()?;
        map.get(key).cloned()
    }

    fn put(&self, key: &str, value: String) {
        if let Ok(mut map) = self.cache.write() {
            map.insert(key.to_string(), value);
            self.flush(&map);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.cache.write() {
            map.remove(key);
            self.flush(&map);
        }
    }
}
