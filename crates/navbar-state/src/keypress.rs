//! Key-press detector
//!
//! A document-level key listener filtered on one key identifier. It fires
//! wherever focus is, for as long as the returned registration is held.

use crate::document::{Document, KeyEvent};
use crate::registration::Registration;

/// Key identifiers the navigation bar listens for
pub mod keys {
    /// Dismisses the mobile menu
    pub const ESCAPE: &str = "Escape";
}

/// Register `on_match` for every key-down of `target_key`
pub fn register(
    document: &Document,
    target_key: impl Into<String>,
    on_match: impl Fn(&KeyEvent) + Send + Sync + 'static,
) -> Registration {
    let target_key = target_key.into();
    document.add_key_listener("key-press", move |event| {
        if event.key == target_key {
            on_match(event);
        }
    })
}
