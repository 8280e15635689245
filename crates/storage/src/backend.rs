//! Storage backends
//!
//! A [`Backend`] is the fallible side of persistence. The state layer never
//! talks to one directly; it goes through [`crate::StoreAdapter`], which turns
//! every failure into "absent" or a dropped write.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::kv::{KvError, KvStore, Result};

/// Fallible string storage keyed by name
pub trait Backend: Send + Sync {
    /// Load the value stored under `key`
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

impl Backend for KvStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.get(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.set(key, value)
    }
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

/// In-process backend, optionally limited by a byte quota
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryBackend {
    /// Create an unlimited memory backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory backend that rejects writes growing past `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self { entries: Mutex::new(HashMap::new()), quota: Some(bytes) }
    }

    /// Seed a value, bypassing the quota (e.g. a value left by an earlier session)
    pub fn seeded(key: &str, value: &str) -> Self {
        let backend = Self::new();
        backend.entries.lock().insert(key.to_string(), value.to_string());
        backend
    }

    /// Current value of a key without going through the trait
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn used_bytes(entries: &HashMap<String, String>) -> usize {
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl Backend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock();

        if let Some(quota) = self.quota {
            let replaced = entries.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = Self::used_bytes(&entries) - replaced + key.len() + value.len();
            if needed > quota {
                return Err(KvError::QuotaExceeded { needed, quota });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Backend that refuses every access
#[derive(Debug, Clone)]
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    /// Create a backend that fails with the given reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl Default for UnavailableBackend {
    fn default() -> Self {
        Self::new("storage access denied")
    }
}

impl Backend for UnavailableBackend {
    fn load(&self, _key: &str) -> Result<Option<String>> {
        Err(KvError::Unavailable(self.reason.clone()))
    }

    fn save(&self, _key: &str, _value: &str) -> Result<()> {
        Err(KvError::Unavailable(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_round_trip() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.load("theme").unwrap(), None);

        backend.save("theme", "dark").unwrap();
        assert_eq!(backend.load("theme").unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_memory_backend_quota() {
        // "theme" + "light" = 10 bytes
        let backend = MemoryBackend::with_quota(10);

        backend.save("theme", "light").unwrap();
        // Replacing the value must account for the bytes it frees
        backend.save("theme", "dark").unwrap();

        let err = backend.save("other", "value").unwrap_err();
        assert!(matches!(err, KvError::QuotaExceeded { needed: 19, quota: 10 }));
        assert_eq!(backend.peek("theme"), Some("dark".to_string()));
    }

    #[test]
    fn test_seeded_backend() {
        let backend = MemoryBackend::seeded("theme", "dark");
        assert_eq!(backend.load("theme").unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_unavailable_backend_fails_everything() {
        let backend = UnavailableBackend::new("private browsing");

        assert!(matches!(backend.load("theme"), Err(KvError::Unavailable(_))));
        assert!(matches!(backend.save("theme", "dark"), Err(KvError::Unavailable(_))));
    }

    #[test]
    fn test_kv_store_backend() {
        let kv = KvStore::in_memory().unwrap();

        Backend::save(&kv, "theme", "dark").unwrap();
        assert_eq!(Backend::load(&kv, "theme").unwrap(), Some("dark".to_string()));
    }
}
