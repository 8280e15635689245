//! Document surface
//!
//! [`Document`] stands in for the page the navigation bar lives on. It holds
//! the globally observable state style rules read (root attributes such as
//! `data-theme`, root style custom properties), a node tree used to decide
//! whether an event target lies inside a region, the focused node, and the
//! document-level pointer/key listeners.
//!
//! All events go through one logical queue: [`Document::dispatch_pointer`] and
//! [`Document::dispatch_key`] run listeners in registration order, one event
//! at a time. Listeners are snapshotted before they run, so a listener may
//! release registrations (its own included) while being dispatched.

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use crate::registration::Registration;

// =============================================================================
// Events
// =============================================================================

/// Identifier of a node in the document tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Identifier shared by every low-level event of one user interaction
///
/// A tap on a touch screen produces a touch event followed by a compatibility
/// mouse event; both carry the same interaction id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InteractionId(pub u64);

/// Pointer device that produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse button press
    Mouse,
    /// Touch start
    Touch,
    /// Stylus contact
    Pen,
}

/// How an event entered the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Produced by the user agent for real input
    User,
    /// Dispatched from script, on behalf of `origin`
    Programmatic {
        /// Node whose handler dispatched the event
        origin: NodeId,
    },
}

/// Pointer-down event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Interaction this event belongs to
    pub interaction: InteractionId,
    /// Device kind
    pub kind: PointerKind,
    /// Node the pointer went down on
    pub target: NodeId,
    /// Trusted input or script dispatch
    pub dispatch: Dispatch,
}

impl PointerEvent {
    /// Real user input on `target`
    pub fn user(interaction: InteractionId, kind: PointerKind, target: NodeId) -> Self {
        Self { interaction, kind, target, dispatch: Dispatch::User }
    }

    /// Script-dispatched event targeting `target` on behalf of `origin`
    pub fn programmatic(interaction: InteractionId, target: NodeId, origin: NodeId) -> Self {
        Self {
            interaction,
            kind: PointerKind::Mouse,
            target,
            dispatch: Dispatch::Programmatic { origin },
        }
    }
}

/// Key-down event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key identifier, e.g. `"Escape"` or `"a"`
    pub key: String,
    /// Node holding focus when the key went down
    pub target: Option<NodeId>,
}

impl KeyEvent {
    /// Create a key event
    pub fn new(key: impl Into<String>, target: Option<NodeId>) -> Self {
        Self { key: key.into(), target }
    }
}

type PointerListener = Arc<dyn Fn(&PointerEvent) + Send + Sync>;
type KeyListener = Arc<dyn Fn(&KeyEvent) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    pointer: Vec<(u64, PointerListener)>,
    key: Vec<(u64, KeyListener)>,
}

// =============================================================================
// Document
// =============================================================================

struct Inner {
    attributes: RwLock<BTreeMap<String, String>>,
    style: RwLock<BTreeMap<String, String>>,
    /// child -> parent; the root has no entry
    parents: RwLock<HashMap<NodeId, NodeId>>,
    next_node: AtomicU64,
    focus: Mutex<Option<NodeId>>,
    listeners: Mutex<Listeners>,
    next_listener: AtomicU64,
    next_interaction: AtomicU64,
}

/// Shared handle to the page surface
#[derive(Clone)]
pub struct Document {
    inner: Arc<Inner>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("attributes", &*self.inner.attributes.read())
            .field("pointer_listeners", &self.pointer_listener_count())
            .field("key_listeners", &self.key_listener_count())
            .finish()
    }
}

impl Document {
    /// Root node of every document
    pub const ROOT: NodeId = NodeId(0);

    /// Non-owning handle, for listeners that must not keep the document alive
    pub fn downgrade(&self) -> WeakDocument {
        WeakDocument { inner: Arc::downgrade(&self.inner) }
    }

    /// Create an empty document
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                attributes: RwLock::new(BTreeMap::new()),
                style: RwLock::new(BTreeMap::new()),
                parents: RwLock::new(HashMap::new()),
                next_node: AtomicU64::new(1),
                focus: Mutex::new(None),
                listeners: Mutex::new(Listeners::default()),
                next_listener: AtomicU64::new(1),
                next_interaction: AtomicU64::new(1),
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Node tree
    // -------------------------------------------------------------------------

    /// Append a new node under `parent`
    pub fn create_node(&self, parent: NodeId) -> NodeId {
        let id = NodeId(self.inner.next_node.fetch_add(1, Ordering::Relaxed));
        self.inner.parents.write().insert(id, parent);
        id
    }

    /// Detach a node; its subtree is no longer connected to the root
    pub fn remove_node(&self, node: NodeId) {
        self.inner.parents.write().remove(&node);
        let mut focus = self.inner.focus.lock();
        if focus.is_some_and(|f| f == node) {
            *focus = None;
        }
    }

    /// Whether `node` is `ancestor` or one of its descendants
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let parents = self.inner.parents.read();
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = parents.get(&n).copied();
        }
        false
    }

    /// Whether `node` is reachable from the root
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(Self::ROOT, node)
    }

    // -------------------------------------------------------------------------
    // Root attributes and style
    // -------------------------------------------------------------------------

    /// Set an attribute on the root element
    pub fn set_attribute(&self, name: &str, value: &str) {
        self.inner.attributes.write().insert(name.to_string(), value.to_string());
    }

    /// Read an attribute of the root element
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner.attributes.read().get(name).cloned()
    }

    /// Remove an attribute from the root element
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        self.inner.attributes.write().remove(name)
    }

    /// Set a custom property (`--name`) on the root style
    pub fn set_style_property(&self, name: &str, value: &str) {
        self.inner.style.write().insert(name.to_string(), value.to_string());
    }

    /// Read a root style property
    pub fn style_property(&self, name: &str) -> Option<String> {
        self.inner.style.read().get(name).cloned()
    }

    /// All root style properties, sorted by name
    pub fn style_properties(&self) -> BTreeMap<String, String> {
        self.inner.style.read().clone()
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    /// Move focus to `node`
    pub fn focus(&self, node: NodeId) {
        *self.inner.focus.lock() = Some(node);
    }

    /// Clear focus
    pub fn blur(&self) {
        *self.inner.focus.lock() = None;
    }

    /// Node currently holding focus
    pub fn focused(&self) -> Option<NodeId> {
        *self.inner.focus.lock()
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Listen to every pointer-down in the document
    pub fn add_pointer_listener(
        &self,
        label: &'static str,
        listener: impl Fn(&PointerEvent) + Send + Sync + 'static,
    ) -> Registration {
        let id = self.inner.next_listener.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().pointer.push((id, Arc::new(listener)));
        tracing::debug!(listener = label, id, "pointer listener registered");

        let weak = Arc::downgrade(&self.inner);
        Registration::new(label, move || remove_listener(&weak, id))
    }

    /// Listen to every key-down in the document
    pub fn add_key_listener(
        &self,
        label: &'static str,
        listener: impl Fn(&KeyEvent) + Send + Sync + 'static,
    ) -> Registration {
        let id = self.inner.next_listener.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().key.push((id, Arc::new(listener)));
        tracing::debug!(listener = label, id, "key listener registered");

        let weak = Arc::downgrade(&self.inner);
        Registration::new(label, move || remove_listener(&weak, id))
    }

    /// Number of registered pointer listeners
    pub fn pointer_listener_count(&self) -> usize {
        self.inner.listeners.lock().pointer.len()
    }

    /// Number of registered key listeners
    pub fn key_listener_count(&self) -> usize {
        self.inner.listeners.lock().key.len()
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Allocate an id for a new user interaction
    pub fn next_interaction(&self) -> InteractionId {
        InteractionId(self.inner.next_interaction.fetch_add(1, Ordering::Relaxed))
    }

    /// Deliver a pointer event to every pointer listener
    pub fn dispatch_pointer(&self, event: &PointerEvent) {
        let snapshot: Vec<PointerListener> =
            self.inner.listeners.lock().pointer.iter().map(|(_, l)| Arc::clone(l)).collect();
        for listener in snapshot {
            listener(event);
        }
    }

    /// Deliver a key event to every key listener
    pub fn dispatch_key(&self, event: &KeyEvent) {
        let snapshot: Vec<KeyListener> =
            self.inner.listeners.lock().key.iter().map(|(_, l)| Arc::clone(l)).collect();
        for listener in snapshot {
            listener(event);
        }
    }

    /// Mouse press on `target` as a single interaction
    pub fn pointer_down(&self, target: NodeId) -> InteractionId {
        let interaction = self.next_interaction();
        self.dispatch_pointer(&PointerEvent::user(interaction, PointerKind::Mouse, target));
        interaction
    }

    /// Touch on `target`: a touch event followed by its compatibility mouse event
    pub fn tap(&self, target: NodeId) -> InteractionId {
        let interaction = self.next_interaction();
        self.dispatch_pointer(&PointerEvent::user(interaction, PointerKind::Touch, target));
        self.dispatch_pointer(&PointerEvent::user(interaction, PointerKind::Mouse, target));
        interaction
    }

    /// Key press delivered with the currently focused node as target
    pub fn key_down(&self, key: &str) {
        let event = KeyEvent::new(key, self.focused());
        self.dispatch_key(&event);
    }
}

/// Weak reference to a [`Document`]
#[derive(Clone)]
pub struct WeakDocument {
    inner: Weak<Inner>,
}

impl WeakDocument {
    /// The document, if it is still alive
    pub fn upgrade(&self) -> Option<Document> {
        self.inner.upgrade().map(|inner| Document { inner })
    }
}

impl fmt::Debug for WeakDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakDocument").field("alive", &(self.inner.strong_count() > 0)).finish()
    }
}

fn remove_listener(inner: &Weak<Inner>, id: u64) {
    // Document already gone: nothing left to detach from
    if let Some(inner) = inner.upgrade() {
        let mut listeners = inner.listeners.lock();
        listeners.pointer.retain(|(l, _)| *l != id);
        listeners.key.retain(|(l, _)| *l != id);
    }
}
