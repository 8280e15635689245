//! Navigation bar state coordination
//!
//! This crate owns the three pieces of cross-cutting state a navigation bar
//! needs (theme, viewport classification, mobile menu) and the primitives
//! that keep them consistent: a document surface with global listeners,
//! scoped listener registrations, and the outside-interaction and key-press
//! detectors.
//!
//! # Modules
//!
//! - [`document`] - Root attributes, style properties, node tree and event dispatch
//! - [`registration`] - Idempotent listener handles
//! - [`outside`] - Outside-interaction detector
//! - [`keypress`] - Key-press detector
//! - [`hydration`] - Two-phase measurement gate
//! - [`viewport`] - Viewport classifier
//! - [`theme`] - Theme controller and theme context
//! - [`link`] - Navigation link entries and activation events
//! - [`menu`] - Navigation menu controller

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod hydration;
pub mod keypress;
pub mod link;
pub mod menu;
pub mod outside;
pub mod registration;
pub mod theme;
pub mod viewport;

pub use document::{
    Dispatch, Document, InteractionId, KeyEvent, NodeId, PointerEvent, PointerKind, WeakDocument,
};
pub use error::{Result, StateError};
pub use hydration::HydrationGate;
pub use keypress::keys;
pub use link::{Activation, ActivateHandler, Icon, LinkActivation, NavLinkEntry};
pub use menu::{MenuOptions, NavMenuController};
pub use outside::RegionHandle;
pub use registration::Registration;
pub use theme::{
    ControlledTheme, ThemeContext, ThemeControl, ThemeController, ThemeSurface, ThemeValue,
    THEME_ATTRIBUTE, THEME_STORAGE_KEY,
};
pub use viewport::{ViewportClassifier, ViewportEvent, ViewportSnapshot, DEFAULT_MOBILE_BREAKPOINT};
