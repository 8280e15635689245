//! Scoped listener registrations
//!
//! Every global listener is acquired as a [`Registration`]. Releasing it is
//! idempotent: calling [`Registration::release`] twice, or releasing and then
//! dropping, runs the cleanup exactly once. Dropping an unreleased handle
//! releases it, so an early unmount never leaks a listener.

use parking_lot::Mutex;
use std::fmt;

type Release = Box<dyn FnOnce() + Send>;

/// Handle to a registered listener
pub struct Registration {
    label: &'static str,
    release: Mutex<Option<Release>>,
}

impl Registration {
    /// Wrap a cleanup function
    pub fn new(label: &'static str, release: impl FnOnce() + Send + 'static) -> Self {
        Self { label, release: Mutex::new(Some(Box::new(release))) }
    }

    /// A handle with nothing to release
    pub fn empty(label: &'static str) -> Self {
        Self { label, release: Mutex::new(None) }
    }

    /// Release the listener; later calls are no-ops
    pub fn release(&self) {
        let release = self.release.lock().take();
        if let Some(release) = release {
            release();
            tracing::debug!(listener = self.label, "listener released");
        }
    }

    /// Whether the listener is still registered
    pub fn is_active(&self) -> bool {
        self.release.lock().is_some()
    }

    /// Listener label used in logs
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("label", &self.label)
            .field("active", &self.is_active())
            .finish()
    }
}
