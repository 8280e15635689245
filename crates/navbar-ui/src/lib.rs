//! Presentation layer for the navigation bar
//!
//! This crate renders the navigation bar from the state owned by
//! `navbar-state`: brand, link list, menu toggle and theme toggle, as a
//! framework-neutral element tree carrying the class markers and
//! accessibility attributes style rules and assistive technology rely on.
//!
//! # Modules
//!
//! - [`navbar`] - Mounted navbar composing theme, viewport and menu
//! - [`components`] - Element tree and component render functions
//! - [`config`] - Serializable widget settings
//! - [`theme`] - Theme colors published as CSS custom properties
//! - [`navigation`] - Active-route predicate
//! - [`tokens`] - Class markers, ids and accessible labels
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use navbar_state::{ControlledTheme, Document, ThemeContext, ThemeValue};
//! use navbar_ui::{Navbar, NavbarProps, NavbarSettings};
//!
//! let settings = NavbarSettings::from_json(r#"{ "navLinks": [{ "label": "Home", "path": "/" }] }"#).unwrap();
//! let theme = ThemeContext::provide(Arc::new(ControlledTheme::new(ThemeValue::Light, |_| {})));
//! let document = Document::new();
//!
//! let navbar = Navbar::mount(&document, NavbarProps::new(settings), &theme).unwrap();
//! let header = navbar.render();
//! assert_eq!(header.attribute("role"), Some("banner"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
pub mod config;
pub mod error;
pub mod navbar;
pub mod navigation;
pub mod theme;
pub mod tokens;

pub use components::{Element, ListState, LogoConfig, LogoPlacement, Node};
pub use config::{NavLinkSettings, NavbarSettings, DEFAULT_BRAND_NAME};
pub use error::{Result, UiError};
pub use navbar::{Navbar, NavbarProps};
pub use navigation::{normalize_path, path_matches, CurrentLocation, RouteMatcher};
pub use theme::{Color, ModeColors, ThemeColors};
pub use tokens::{aria, classes, icons, ids, sizing};
