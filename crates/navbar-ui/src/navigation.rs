//! Active-route predicate
//!
//! Routing itself belongs to the host. The navigation bar only asks whether
//! a link's path is the current location, to set the `active` marker.

use parking_lot::RwLock;
use std::sync::Arc;

// =============================================================================
// Route Matching
// =============================================================================

/// Answers whether a path is currently active
pub trait RouteMatcher: Send + Sync {
    /// Whether a link to `path` should be marked active
    fn is_active(&self, path: &str) -> bool;
}

impl<F> RouteMatcher for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_active(&self, path: &str) -> bool {
        self(path)
    }
}

/// Normalize a path for comparison
///
/// Percent-escapes are decoded, the query and fragment are dropped, and
/// trailing slashes are removed (the root stays `/`).
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let decoded = match urlencoding::decode(path) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => path.to_string(),
    };

    let trimmed = decoded.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Whether a link to `link` is active at `current`
///
/// A link is active at its own path and at any path below it; the root link
/// is only active at the root.
pub fn path_matches(link: &str, current: &str) -> bool {
    let link = normalize_path(link);
    let current = normalize_path(current);

    if link == "/" {
        return current == "/";
    }
    current == link || current.strip_prefix(&link).is_some_and(|rest| rest.starts_with('/'))
}

// =============================================================================
// Current Location
// =============================================================================

/// Shared current location, updated by the host router
#[derive(Debug, Clone)]
pub struct CurrentLocation {
    path: Arc<RwLock<String>>,
}

impl Default for CurrentLocation {
    fn default() -> Self {
        Self::new("/")
    }
}

impl CurrentLocation {
    /// Location starting at `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: Arc::new(RwLock::new(path.into())) }
    }

    /// Current path
    pub fn path(&self) -> String {
        self.path.read().clone()
    }

    /// Record a navigation to `path`
    pub fn navigate(&self, path: impl Into<String>) {
        let path = path.into();
        tracing::debug!(path = %path, "location changed");
        *self.path.write() = path;
    }
}

impl RouteMatcher for CurrentLocation {
    fn is_active(&self, path: &str) -> bool {
        path_matches(path, &self.path.read())
    }
}
