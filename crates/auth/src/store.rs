//! Key-value persistence port for session state.
//!
//! The host decides where session state lives (browser storage, a file, a
//! shared cache). This core only requires string get/put/remove. Writes are
//! best-effort: implementations must never block or fail the in-memory state
//! transition — a broken store degrades persistence, not authentication.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Persisted entry names for session state.
pub mod keys {
    /// `"true"`/`"false"` flag for developer bypass mode. Absence reads false.
    pub const BYPASS_ENABLED: &str = "bypass_enabled";

    /// JSON-serialized [`crate::Identity`], present only while bypass holds one.
    pub const MOCK_IDENTITY: &str = "mock_identity";
}

/// Key/value store abstraction for persisted session state.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

impl<S> SessionStore for Arc<S>
where
    S: SessionStore + ?Sized,
{
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: String) {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    fn put(&self, key: &str, value: String) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_remove() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.get(keys::BYPASS_ENABLED), None);

        store.put(keys::BYPASS_ENABLED, "true".to_string());
        assert_eq!(store.get(keys::BYPASS_ENABLED).as_deref(), Some("true"));

        store.remove(keys::BYPASS_ENABLED);
        assert_eq!(store.get(keys::BYPASS_ENABLED), None);
    }

    #[test]
    fn arc_forwards_to_inner_store() {
        let store = Arc::new(InMemorySessionStore::new());
        let alias: Arc<dyn SessionStore> = store.clone();

        alias.put("k", "v".to_string());
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }
}
