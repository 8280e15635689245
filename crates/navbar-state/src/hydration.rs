//! Two-phase measurement gate
//!
//! Before the first client-side measurement exists, any classification that
//! depends on it would be a guess. [`HydrationGate`] answers with a
//! conservative default until [`HydrationGate::complete`] is called, and with
//! the measured answer afterwards. The phase change happens exactly once.

use std::sync::atomic::{AtomicBool, Ordering};

/// Gate between the unmeasured and measured phases
#[derive(Debug, Default)]
pub struct HydrationGate {
    measured: AtomicBool,
}

impl HydrationGate {
    /// Create a gate in the unmeasured phase
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the measured phase; returns `true` only for the call that did so
    pub fn complete(&self) -> bool {
        self.measured
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Whether the first measurement has happened
    pub fn is_measured(&self) -> bool {
        self.measured.load(Ordering::Acquire)
    }

    /// `conservative` before the first measurement, `measured()` after
    pub fn classify<T>(&self, conservative: T, measured: impl FnOnce() -> T) -> T {
        if self.is_measured() {
            measured()
        } else {
            conservative
        }
    }
}
