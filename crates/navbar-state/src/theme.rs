//! Theme controller
//!
//! [`ThemeController`] owns the single authoritative [`ThemeValue`]. It is
//! initialized from the persistent store under [`THEME_STORAGE_KEY`] (falling
//! back to light), and every change runs in a fixed order:
//!
//! 1. the in-memory value is updated,
//! 2. every attached [`ThemeSurface`] is told synchronously (the document
//!    surface sets `data-theme` on the root),
//! 3. a persistence write is issued and not awaited,
//! 4. subscribers are notified through a watch channel.
//!
//! Consumers get the controller by explicit injection. A parent can either
//! hand down a shared [`ThemeController`] or thread the value through props
//! with [`ControlledTheme`]; both implement [`ThemeControl`]. Looking a theme
//! up through a [`ThemeContext`] that has no provider is a wiring mistake and
//! fails immediately.

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use storage::PersistentStore;
use tokio::sync::watch;

use crate::document::Document;
use crate::error::{Result, StateError};

/// Key the theme is persisted under
pub const THEME_STORAGE_KEY: &str = "theme";

/// Root attribute style rules read the theme from
pub const THEME_ATTRIBUTE: &str = "data-theme";

// =============================================================================
// Theme Value
// =============================================================================

/// Light or dark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeValue {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl ThemeValue {
    /// Literal used in storage, attributes and class names
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeValue::Light => "light",
            ThemeValue::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            ThemeValue::Light => ThemeValue::Dark,
            ThemeValue::Dark => ThemeValue::Light,
        }
    }
}

impl fmt::Display for ThemeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemeValue {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(ThemeValue::Light),
            "dark" => Ok(ThemeValue::Dark),
            _ => Err(StateError::InvalidTheme(s.to_string())),
        }
    }
}

// =============================================================================
// Surfaces and control
// =============================================================================

/// Something that must reflect the current theme immediately
///
/// Surfaces are called while the controller serializes transitions, so they
/// must not change the theme themselves.
pub trait ThemeSurface: Send + Sync {
    /// Apply `theme`
    fn apply_theme(&self, theme: ThemeValue);
}

impl ThemeSurface for Document {
    fn apply_theme(&self, theme: ThemeValue) {
        self.set_attribute(THEME_ATTRIBUTE, theme.as_str());
    }
}

/// Read and toggle access to a theme, however it is owned
pub trait ThemeControl: Send + Sync {
    /// Current theme
    fn theme(&self) -> ThemeValue;

    /// Switch to the other theme
    fn toggle_theme(&self);

    /// Receiver that observes every change
    fn subscribe(&self) -> watch::Receiver<ThemeValue>;
}

// =============================================================================
// Theme Controller
// =============================================================================

struct ThemeInner {
    current: RwLock<ThemeValue>,
    /// Held for the whole of a transition so effects apply in call order
    transition: Mutex<()>,
    surfaces: RwLock<Vec<Arc<dyn ThemeSurface>>>,
    store: Arc<dyn PersistentStore>,
    tx: watch::Sender<ThemeValue>,
}

/// Owner of the application's theme value
#[derive(Clone)]
pub struct ThemeController {
    inner: Arc<ThemeInner>,
}

impl fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeController")
            .field("theme", &self.theme())
            .field("surfaces", &self.inner.surfaces.read().len())
            .finish()
    }
}

impl ThemeController {
    /// Create the controller, resolving the initial theme from `store`
    pub fn new(store: Arc<dyn PersistentStore>) -> Self {
        let initial = match store.read(THEME_STORAGE_KEY) {
            Some(raw) => raw.parse::<ThemeValue>().unwrap_or_else(|e: StateError| {
                tracing::warn!(error = %e, "ignoring persisted theme");
                ThemeValue::default()
            }),
            None => ThemeValue::default(),
        };
        tracing::debug!(theme = %initial, "theme initialized");

        let (tx, _rx) = watch::channel(initial);
        Self {
            inner: Arc::new(ThemeInner {
                current: RwLock::new(initial),
                transition: Mutex::new(()),
                surfaces: RwLock::new(Vec::new()),
                store,
                tx,
            }),
        }
    }

    /// Attach a surface and bring it in sync with the current theme
    pub fn attach_surface(&self, surface: Arc<dyn ThemeSurface>) {
        let _transition = self.inner.transition.lock();
        surface.apply_theme(*self.inner.current.read());
        self.inner.surfaces.write().push(surface);
    }

    /// Builder form of [`ThemeController::attach_surface`]
    pub fn with_surface(self, surface: Arc<dyn ThemeSurface>) -> Self {
        self.attach_surface(surface);
        self
    }

    /// Current theme
    pub fn theme(&self) -> ThemeValue {
        *self.inner.current.read()
    }

    /// Flip the theme
    pub fn toggle_theme(&self) {
        self.transition(ThemeValue::toggled);
    }

    /// Set the theme explicitly; setting the current value is a no-op
    pub fn set_theme(&self, theme: ThemeValue) {
        self.transition(|_| theme);
    }

    /// Receiver that observes every change
    pub fn subscribe(&self) -> watch::Receiver<ThemeValue> {
        self.inner.tx.subscribe()
    }

    fn transition(&self, next: impl FnOnce(ThemeValue) -> ThemeValue) {
        let _transition = self.inner.transition.lock();

        let (previous, theme) = {
            let mut current = self.inner.current.write();
            let previous = *current;
            *current = next(previous);
            (previous, *current)
        };
        if previous == theme {
            return;
        }

        for surface in self.inner.surfaces.read().iter() {
            surface.apply_theme(theme);
        }
        self.inner.store.write(THEME_STORAGE_KEY, theme.as_str());
        self.inner.tx.send_replace(theme);

        tracing::debug!(from = %previous, to = %theme, "theme changed");
    }
}

impl ThemeControl for ThemeController {
    fn theme(&self) -> ThemeValue {
        ThemeController::theme(self)
    }

    fn toggle_theme(&self) {
        ThemeController::toggle_theme(self)
    }

    fn subscribe(&self) -> watch::Receiver<ThemeValue> {
        ThemeController::subscribe(self)
    }
}

// =============================================================================
// Controlled theme (prop threading)
// =============================================================================

type ThemeSetter = Arc<dyn Fn(ThemeValue) + Send + Sync>;

/// Theme owned by a parent and threaded down as a value plus a setter
///
/// Toggling asks the parent to change the theme through the setter; the
/// parent hands the new value back with [`ControlledTheme::sync`].
#[derive(Clone)]
pub struct ControlledTheme {
    tx: Arc<watch::Sender<ThemeValue>>,
    set_theme: ThemeSetter,
}

impl fmt::Debug for ControlledTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlledTheme").field("theme", &*self.tx.borrow()).finish()
    }
}

impl ControlledTheme {
    /// Create from the parent's current value and setter
    pub fn new(theme: ThemeValue, set_theme: impl Fn(ThemeValue) + Send + Sync + 'static) -> Self {
        let (tx, _rx) = watch::channel(theme);
        Self { tx: Arc::new(tx), set_theme: Arc::new(set_theme) }
    }

    /// Receive the parent's current value
    pub fn sync(&self, theme: ThemeValue) {
        self.tx.send_if_modified(|current| {
            if *current == theme {
                return false;
            }
            *current = theme;
            true
        });
    }
}

impl ThemeControl for ControlledTheme {
    fn theme(&self) -> ThemeValue {
        *self.tx.borrow()
    }

    fn toggle_theme(&self) {
        let next = self.theme().toggled();
        (self.set_theme)(next);
    }

    fn subscribe(&self) -> watch::Receiver<ThemeValue> {
        self.tx.subscribe()
    }
}

// =============================================================================
// Theme context
// =============================================================================

/// Explicitly injected theme provider
#[derive(Clone, Default)]
pub struct ThemeContext {
    provider: Option<Arc<dyn ThemeControl>>,
}

impl fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeContext")
            .field("provided", &self.provider.is_some())
            .finish()
    }
}

impl ThemeContext {
    /// Context providing `control` to every consumer
    pub fn provide(control: Arc<dyn ThemeControl>) -> Self {
        Self { provider: Some(control) }
    }

    /// Context with no provider
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether a provider is present
    pub fn is_provided(&self) -> bool {
        self.provider.is_some()
    }

    /// The provided theme, or [`StateError::ContextMissing`] naming `consumer`
    pub fn use_theme(&self, consumer: &'static str) -> Result<Arc<dyn ThemeControl>> {
        match &self.provider {
            Some(control) => Ok(Arc::clone(control)),
            None => {
                tracing::error!(consumer, "theme used outside of a theme provider");
                Err(StateError::ContextMissing { consumer })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::{mock, predicate::eq, Sequence};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storage::{MemoryBackend, StoreAdapter, UnavailableBackend};

    mock! {
        Store {}
        impl PersistentStore for Store {
            fn read(&self, key: &str) -> Option<String>;
            fn write(&self, key: &str, value: &str);
        }
    }

    fn memory_store() -> Arc<StoreAdapter<MemoryBackend>> {
        Arc::new(StoreAdapter::new(MemoryBackend::new()))
    }

    // ==========================================================================
    // Theme Value Tests
    // ==========================================================================

    #[test]
    fn test_theme_value_literals() {
        assert_eq!(ThemeValue::Light.as_str(), "light");
        assert_eq!(ThemeValue::Dark.to_string(), "dark");
        assert_eq!(ThemeValue::default(), ThemeValue::Light);
    }

    #[test]
    fn test_theme_value_from_str() {
        assert_eq!("light".parse::<ThemeValue>().unwrap(), ThemeValue::Light);
        assert_eq!("dark".parse::<ThemeValue>().unwrap(), ThemeValue::Dark);
        assert!("DARK".parse::<ThemeValue>().is_err());
        assert!(" dark ".parse::<ThemeValue>().is_err());
        assert_eq!(
            "dim".parse::<ThemeValue>(),
            Err(StateError::InvalidTheme("dim".to_string()))
        );
    }

    #[test]
    fn test_theme_value_serialization() {
        let json = serde_json::to_string(&ThemeValue::Dark).unwrap();
        assert_eq!(json, "\"dark\"");

        let value: ThemeValue = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(value, ThemeValue::Light);
    }

    // ==========================================================================
    // Initialization Tests
    // ==========================================================================

    #[test]
    fn test_initial_theme_from_store() {
        let store = Arc::new(StoreAdapter::new(MemoryBackend::seeded(THEME_STORAGE_KEY, "dark")));
        let controller = ThemeController::new(store);
        assert_eq!(controller.theme(), ThemeValue::Dark);
    }

    #[test]
    fn test_initial_theme_defaults_when_absent() {
        let controller = ThemeController::new(memory_store());
        assert_eq!(controller.theme(), ThemeValue::Light);
    }

    #[test]
    fn test_initial_theme_defaults_when_invalid() {
        let store = Arc::new(StoreAdapter::new(MemoryBackend::seeded(THEME_STORAGE_KEY, "sepia")));
        let controller = ThemeController::new(store);
        assert_eq!(controller.theme(), ThemeValue::Light);
    }

    #[test]
    fn test_initial_theme_requires_exact_literal() {
        let store = Arc::new(StoreAdapter::new(MemoryBackend::seeded(THEME_STORAGE_KEY, "DARK ")));
        let controller = ThemeController::new(store);
        assert_eq!(controller.theme(), ThemeValue::Light);
    }

    #[test]
    fn test_initial_theme_defaults_when_unavailable() {
        let store = Arc::new(StoreAdapter::new(UnavailableBackend::default()));
        let controller = ThemeController::new(store);

        controller.toggle_theme();
        assert_eq!(controller.theme(), ThemeValue::Dark);
    }

    // ==========================================================================
    // Toggle Tests
    // ==========================================================================

    #[test]
    fn test_toggle_is_an_involution() {
        let controller = ThemeController::new(memory_store());

        for n in 1..=7 {
            controller.toggle_theme();
            let expected = if n % 2 == 0 { ThemeValue::Light } else { ThemeValue::Dark };
            assert_eq!(controller.theme(), expected, "after {n} toggles");
        }
    }

    #[test]
    fn test_toggle_persists_literal() {
        let store = memory_store();
        let controller = ThemeController::new(store.clone());

        controller.toggle_theme();
        assert_eq!(store.backend().peek(THEME_STORAGE_KEY), Some("dark".to_string()));

        controller.toggle_theme();
        assert_eq!(store.backend().peek(THEME_STORAGE_KEY), Some("light".to_string()));
    }

    #[test]
    fn test_toggle_writes_each_call_in_order() {
        let mut store = MockStore::new();
        let mut seq = Sequence::new();

        store.expect_read().with(eq(THEME_STORAGE_KEY)).times(1).return_const(None::<String>);
        store
            .expect_write()
            .with(eq(THEME_STORAGE_KEY), eq("dark"))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        store
            .expect_write()
            .with(eq(THEME_STORAGE_KEY), eq("light"))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let controller = ThemeController::new(Arc::new(store));
        controller.toggle_theme();
        controller.toggle_theme();
    }

    #[test]
    fn test_set_same_theme_is_noop() {
        let mut store = MockStore::new();
        store.expect_read().return_const(Some("dark".to_string()));
        store.expect_write().times(0);

        let controller = ThemeController::new(Arc::new(store));
        controller.set_theme(ThemeValue::Dark);
        assert_eq!(controller.theme(), ThemeValue::Dark);
    }

    #[test]
    fn test_surface_updated_before_write() {
        struct Recorder {
            doc: Document,
            store: Arc<StoreAdapter<MemoryBackend>>,
            checks: AtomicUsize,
        }

        impl ThemeSurface for Recorder {
            fn apply_theme(&self, theme: ThemeValue) {
                self.doc.apply_theme(theme);
                // Persistence has not been issued yet for this change
                let persisted = self.store.backend().peek(THEME_STORAGE_KEY);
                if theme == ThemeValue::Dark {
                    assert_eq!(persisted, None);
                }
                self.checks.fetch_add(1, Ordering::SeqCst);
            }
        }

        let store = memory_store();
        let doc = Document::new();
        let recorder = Arc::new(Recorder {
            doc: doc.clone(),
            store: store.clone(),
            checks: AtomicUsize::new(0),
        });
        let controller = ThemeController::new(store.clone()).with_surface(recorder.clone());

        controller.toggle_theme();

        assert_eq!(recorder.checks.load(Ordering::SeqCst), 2);
        assert_eq!(doc.attribute(THEME_ATTRIBUTE), Some("dark".to_string()));
        assert_eq!(store.backend().peek(THEME_STORAGE_KEY), Some("dark".to_string()));
    }

    #[test]
    fn test_document_surface_synced_on_attach() {
        let store = Arc::new(StoreAdapter::new(MemoryBackend::seeded(THEME_STORAGE_KEY, "dark")));
        let doc = Document::new();

        let controller = ThemeController::new(store).with_surface(Arc::new(doc.clone()));
        assert_eq!(doc.attribute(THEME_ATTRIBUTE), Some("dark".to_string()));

        controller.toggle_theme();
        assert_eq!(doc.attribute(THEME_ATTRIBUTE), Some("light".to_string()));
    }

    #[test]
    fn test_subscribers_observe_changes() {
        let controller = ThemeController::new(memory_store());
        let mut rx = controller.subscribe();
        assert!(!rx.has_changed().unwrap());

        controller.toggle_theme();

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), ThemeValue::Dark);
    }

    #[test]
    fn test_clones_share_state() {
        let controller = ThemeController::new(memory_store());
        let handle = controller.clone();

        handle.toggle_theme();
        assert_eq!(controller.theme(), ThemeValue::Dark);
    }

    // ==========================================================================
    // Controlled Theme Tests
    // ==========================================================================

    #[test]
    fn test_controlled_theme_requests_change_from_parent() {
        let requested = Arc::new(Mutex::new(Vec::new()));
        let r = Arc::clone(&requested);
        let controlled = ControlledTheme::new(ThemeValue::Light, move |theme| r.lock().push(theme));

        controlled.toggle_theme();
        // The parent has not synced yet
        assert_eq!(controlled.theme(), ThemeValue::Light);
        assert_eq!(*requested.lock(), vec![ThemeValue::Dark]);

        controlled.sync(ThemeValue::Dark);
        assert_eq!(controlled.theme(), ThemeValue::Dark);
    }

    #[test]
    fn test_controlled_theme_round_trip_through_parent() {
        let slot: Arc<Mutex<Option<ControlledTheme>>> = Arc::new(Mutex::new(None));
        let s = Arc::clone(&slot);
        let controlled = ControlledTheme::new(ThemeValue::Light, move |theme| {
            if let Some(c) = s.lock().as_ref() {
                c.sync(theme);
            }
        });
        *slot.lock() = Some(controlled.clone());

        controlled.toggle_theme();
        assert_eq!(controlled.theme(), ThemeValue::Dark);
        controlled.toggle_theme();
        assert_eq!(controlled.theme(), ThemeValue::Light);
    }

    // ==========================================================================
    // Context Tests
    // ==========================================================================

    #[test]
    fn test_context_without_provider_fails_fast() {
        let context = ThemeContext::empty();
        let err = context.use_theme("ThemeToggle").err().unwrap();

        assert_eq!(err, StateError::ContextMissing { consumer: "ThemeToggle" });
        assert_eq!(err.to_string(), "ThemeToggle used outside of a theme provider");
    }

    #[test]
    fn test_context_shares_one_controller() {
        let controller = ThemeController::new(memory_store());
        let context = ThemeContext::provide(Arc::new(controller.clone()));

        context.use_theme("Header").unwrap().toggle_theme();
        assert_eq!(context.use_theme("Footer").unwrap().theme(), ThemeValue::Dark);
        assert_eq!(controller.theme(), ThemeValue::Dark);
    }
}
