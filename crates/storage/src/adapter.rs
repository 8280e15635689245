//! Best-effort persistence contract
//!
//! [`PersistentStore`] is what the state layer consumes: reads never fail
//! (a broken store reads as "absent") and writes never report. There are no
//! retries; the in-memory value stays authoritative for the session.

use std::sync::Arc;

use crate::backend::Backend;

/// Infallible read/write of named string values
pub trait PersistentStore: Send + Sync {
    /// Read the value under `key`, `None` if absent or unreadable
    fn read(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`; failures are swallowed
    fn write(&self, key: &str, value: &str);
}

impl<S: PersistentStore + ?Sized> PersistentStore for Arc<S> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) {
        (**self).write(key, value)
    }
}

/// Adapts a fallible [`Backend`] to the [`PersistentStore`] contract
#[derive(Debug, Clone, Default)]
pub struct StoreAdapter<B> {
    backend: B,
}

impl<B: Backend> StoreAdapter<B> {
    /// Wrap a backend
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Access the wrapped backend
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: Backend> PersistentStore for StoreAdapter<B> {
    fn read(&self, key: &str) -> Option<String> {
        match self.backend.load(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "store read failed, treating as absent");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.backend.save(key, value) {
            tracing::warn!(key, error = %e, "store write dropped");
        }
    }
}
