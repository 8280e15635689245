//! Outside-interaction detector
//!
//! Calls back once per user interaction that starts outside a region. The
//! region is a [`RegionHandle`] so it can be attached after the detector is
//! registered (the region's node usually exists only once rendered); while
//! nothing is attached no interaction qualifies.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::document::{Dispatch, Document, InteractionId, NodeId, PointerEvent};
use crate::registration::Registration;

/// Late-bound reference to the node delimiting a region
#[derive(Debug, Clone, Default)]
pub struct RegionHandle {
    node: Arc<RwLock<Option<NodeId>>>,
}

impl RegionHandle {
    /// A handle with no node attached yet
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle already attached to `node`
    pub fn attached(node: NodeId) -> Self {
        let handle = Self::new();
        handle.attach(node);
        handle
    }

    /// Point the handle at `node`
    pub fn attach(&self, node: NodeId) {
        *self.node.write() = Some(node);
    }

    /// Detach the handle
    pub fn detach(&self) {
        *self.node.write() = None;
    }

    /// Node currently attached
    pub fn node(&self) -> Option<NodeId> {
        *self.node.read()
    }
}

/// Register `on_outside` for pointer interactions outside `region`
///
/// The callback receives the first qualifying event of each interaction. An
/// event qualifies when its target is outside the region and, for script
/// dispatched events, when the dispatching node is outside the region too.
pub fn register(
    document: &Document,
    region: RegionHandle,
    on_outside: impl Fn(&PointerEvent) + Send + Sync + 'static,
) -> Registration {
    let weak = document.downgrade();
    let last_fired: parking_lot::Mutex<Option<InteractionId>> = parking_lot::Mutex::new(None);

    document.add_pointer_listener("outside-interaction", move |event| {
        let (Some(root), Some(doc)) = (region.node(), weak.upgrade()) else {
            return;
        };
        if doc.contains(root, event.target) {
            return;
        }
        if let Dispatch::Programmatic { origin } = event.dispatch {
            if doc.contains(root, origin) {
                return;
            }
        }

        {
            let mut last = last_fired.lock();
            if *last == Some(event.interaction) {
                return;
            }
            *last = Some(event.interaction);
        }

        tracing::debug!(interaction = event.interaction.0, target = event.target.0, "outside interaction");
        on_outside(event);
    })
}
