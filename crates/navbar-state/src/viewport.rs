//! Viewport classifier
//!
//! Tracks the viewport width and derives whether the layout is "mobile":
//!
//! ```text
//! is_mobile = hydrated && width < breakpoint
//! ```
//!
//! Until the first client-side measurement ([`ViewportEvent::Hydrated`]) the
//! classification is always `false`, whatever width was reported, so the
//! pre-hydration render is the desktop-safe one. Width changes smaller than
//! [`MEASUREMENT_GRANULARITY`] are treated as noise and do not notify
//! subscribers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

use crate::hydration::HydrationGate;

/// Width below which the layout is mobile, in CSS pixels
pub const DEFAULT_MOBILE_BREAKPOINT: f64 = 768.0;

/// Smallest width change that counts as a new measurement
pub const MEASUREMENT_GRANULARITY: f64 = 1.0;

/// A measurement reported by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// First client-side measurement pass finished
    Hydrated {
        /// Measured width
        width: f64,
    },
    /// Window resized
    Resized {
        /// New width
        width: f64,
    },
    /// Device rotated
    OrientationChanged {
        /// Width after rotation
        width: f64,
    },
}

impl ViewportEvent {
    /// Width carried by the event
    pub fn width(&self) -> f64 {
        match *self {
            ViewportEvent::Hydrated { width }
            | ViewportEvent::Resized { width }
            | ViewportEvent::OrientationChanged { width } => width,
        }
    }
}

/// Current classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ViewportSnapshot {
    /// Last accepted width (0 until something was reported)
    pub width: f64,
    /// Whether the first measurement has happened
    pub hydrated: bool,
    /// Derived mobile classification
    pub is_mobile: bool,
}

struct Inner {
    breakpoint: f64,
    gate: HydrationGate,
    tx: watch::Sender<ViewportSnapshot>,
}

/// Shared viewport classifier
#[derive(Clone)]
pub struct ViewportClassifier {
    inner: Arc<Inner>,
}

impl fmt::Debug for ViewportClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportClassifier")
            .field("breakpoint", &self.inner.breakpoint)
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

impl Default for ViewportClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_MOBILE_BREAKPOINT)
    }
}

impl ViewportClassifier {
    /// Create a classifier; a non-finite or non-positive breakpoint falls back to the default
    pub fn new(breakpoint: f64) -> Self {
        let breakpoint = if breakpoint.is_finite() && breakpoint > 0.0 {
            breakpoint
        } else {
            tracing::warn!(breakpoint, "invalid mobile breakpoint, using default");
            DEFAULT_MOBILE_BREAKPOINT
        };

        let (tx, _rx) = watch::channel(ViewportSnapshot::default());
        Self { inner: Arc::new(Inner { breakpoint, gate: HydrationGate::new(), tx }) }
    }

    /// Configured breakpoint
    pub fn breakpoint(&self) -> f64 {
        self.inner.breakpoint
    }

    /// Feed a measurement; returns whether subscribers were notified
    pub fn observe(&self, event: ViewportEvent) -> bool {
        let width = event.width();
        if !width.is_finite() || width < 0.0 {
            tracing::warn!(?event, "ignoring invalid viewport width");
            return false;
        }

        let hydrated_now = matches!(event, ViewportEvent::Hydrated { .. }) && self.inner.gate.complete();
        if hydrated_now {
            tracing::debug!(width, "viewport hydrated");
        }

        let breakpoint = self.inner.breakpoint;
        let gate = &self.inner.gate;
        self.inner.tx.send_if_modified(|snapshot| {
            let noise = (width - snapshot.width).abs() < MEASUREMENT_GRANULARITY;
            if noise && !hydrated_now {
                return false;
            }

            snapshot.width = width;
            snapshot.hydrated = gate.is_measured();
            snapshot.is_mobile = gate.classify(false, || width < breakpoint);
            true
        })
    }

    /// Shorthand for [`ViewportEvent::Hydrated`]
    pub fn hydrate(&self, width: f64) -> bool {
        self.observe(ViewportEvent::Hydrated { width })
    }

    /// Shorthand for [`ViewportEvent::Resized`]
    pub fn resize(&self, width: f64) -> bool {
        self.observe(ViewportEvent::Resized { width })
    }

    /// Current snapshot
    pub fn snapshot(&self) -> ViewportSnapshot {
        *self.inner.tx.borrow()
    }

    /// Whether the layout is mobile (always `false` before hydration)
    pub fn is_mobile(&self) -> bool {
        self.snapshot().is_mobile
    }

    /// Whether the first measurement has happened
    pub fn is_hydrated(&self) -> bool {
        self.inner.gate.is_measured()
    }

    /// Stream of snapshots, updated on every accepted measurement
    pub fn subscribe(&self) -> watch::Receiver<ViewportSnapshot> {
        self.inner.tx.subscribe()
    }
}
