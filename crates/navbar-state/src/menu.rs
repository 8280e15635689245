//! Navigation menu controller
//!
//! Owns the open flag of one mounted menu. Mounting registers an
//! outside-interaction detector on the menu region and an Escape key
//! detector; both only ever close the menu. Unmounting (or dropping the
//! controller) releases both registrations.
//!
//! A single interaction produces one transition. When a press outside the
//! region closes the menu and the same press then reaches the menu toggle
//! (which usually sits outside the list), the toggle is ignored rather than
//! reopening the menu.

use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use tokio::sync::watch;

use crate::document::{Document, InteractionId};
use crate::keypress::{self, keys};
use crate::link::{Activation, ActivateHandler, LinkActivation, NavLinkEntry};
use crate::outside::{self, RegionHandle};
use crate::registration::Registration;
use crate::viewport::ViewportClassifier;

/// Options accepted when mounting a menu
#[derive(Clone, Default)]
pub struct MenuOptions {
    /// Global handler run for every link activation, after the link's own
    pub on_nav_item_click: Option<ActivateHandler>,
}

impl MenuOptions {
    /// Set the global link handler
    pub fn on_nav_item_click(
        mut self,
        handler: impl Fn(&LinkActivation) -> Activation + Send + Sync + 'static,
    ) -> Self {
        self.on_nav_item_click = Some(Arc::new(handler));
        self
    }
}

impl fmt::Debug for MenuOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuOptions")
            .field("on_nav_item_click", &self.on_nav_item_click.is_some())
            .finish()
    }
}

struct MenuState {
    open: watch::Sender<bool>,
    /// Interaction that last closed the menu from outside
    dismissed_by: Mutex<Option<InteractionId>>,
}

impl MenuState {
    fn set(&self, value: bool) -> bool {
        self.open.send_if_modified(|open| {
            if *open == value {
                return false;
            }
            *open = value;
            true
        })
    }

    fn dismiss(&self, interaction: Option<InteractionId>, reason: &'static str) {
        if self.set(false) {
            *self.dismissed_by.lock() = interaction;
            tracing::debug!(reason, "menu dismissed");
        }
    }
}

/// Controller for one mounted navigation menu
pub struct NavMenuController {
    state: Arc<MenuState>,
    region: RegionHandle,
    viewport: ViewportClassifier,
    on_nav_item_click: Option<ActivateHandler>,
    registrations: Vec<Registration>,
}

impl fmt::Debug for NavMenuController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavMenuController")
            .field("open", &self.is_open())
            .field("region", &self.region.node())
            .field("registrations", &self.registrations)
            .finish()
    }
}

impl NavMenuController {
    /// Mount a closed menu and register its dismissal detectors
    pub fn mount(
        document: &Document,
        region: RegionHandle,
        viewport: ViewportClassifier,
        options: MenuOptions,
    ) -> Self {
        let (open, _rx) = watch::channel(false);
        let state = Arc::new(MenuState { open, dismissed_by: Mutex::new(None) });

        let weak: Weak<MenuState> = Arc::downgrade(&state);
        let on_outside = outside::register(document, region.clone(), move |event| {
            if let Some(state) = weak.upgrade() {
                state.dismiss(Some(event.interaction), "outside interaction");
            }
        });

        let weak: Weak<MenuState> = Arc::downgrade(&state);
        let on_escape = keypress::register(document, keys::ESCAPE, move |_| {
            if let Some(state) = weak.upgrade() {
                state.dismiss(None, "escape");
            }
        });

        tracing::debug!("menu controller mounted");
        Self {
            state,
            region,
            viewport,
            on_nav_item_click: options.on_nav_item_click,
            registrations: vec![on_outside, on_escape],
        }
    }

    /// Flip the open flag
    pub fn toggle(&self) {
        let open = !self.is_open();
        self.state.set(open);
    }

    /// Flip the open flag in response to `interaction`
    ///
    /// Ignored when the same interaction already closed the menu from outside.
    pub fn toggle_for(&self, interaction: InteractionId) {
        if *self.state.dismissed_by.lock() == Some(interaction) {
            tracing::debug!(interaction = interaction.0, "toggle suppressed after outside dismissal");
            return;
        }
        self.toggle();
    }

    /// Open the menu
    pub fn open(&self) {
        self.state.set(true);
    }

    /// Close the menu; no-op when already closed
    pub fn close(&self) {
        self.state.set(false);
    }

    /// Whether the menu is open
    pub fn is_open(&self) -> bool {
        *self.state.open.borrow()
    }

    /// Stream of open-flag changes
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.open.subscribe()
    }

    /// Current mobile classification
    pub fn is_mobile(&self) -> bool {
        self.viewport.is_mobile()
    }

    /// Viewport the controller reads
    pub fn viewport(&self) -> &ViewportClassifier {
        &self.viewport
    }

    /// Region delimiting the menu
    pub fn region(&self) -> &RegionHandle {
        &self.region
    }

    /// React to `entry` being activated
    ///
    /// On mobile the menu closes first. The link's own handler runs next,
    /// then the global one; either answering [`Activation::Handled`] prevents
    /// the default navigation.
    pub fn on_link_activate(&self, entry: &NavLinkEntry, activation: &mut LinkActivation) {
        if self.is_mobile() {
            self.close();
        }

        let handlers = entry.on_activate.iter().chain(self.on_nav_item_click.iter());
        for handler in handlers {
            if handler(activation) == Activation::Handled {
                activation.prevent_default();
            }
        }

        tracing::debug!(
            path = activation.target_path(),
            prevented = activation.is_default_prevented(),
            "link activated"
        );
    }

    /// Activate `entry` with a fresh event and return it
    pub fn activate(&self, entry: &NavLinkEntry) -> LinkActivation {
        let mut activation = entry.activation();
        self.on_link_activate(entry, &mut activation);
        activation
    }

    /// Release the detectors; the menu stops reacting to document events
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for NavMenuController {
    fn drop(&mut self) {
        for registration in &self.registrations {
            registration.release();
        }
        tracing::debug!("menu controller unmounted");
    }
}
