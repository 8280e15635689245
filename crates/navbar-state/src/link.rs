//! Navigation link entries
//!
//! A [`NavLinkEntry`] describes one item of the navigation list. Activating
//! it raises a [`LinkActivation`], which handlers can mark as handled to
//! prevent the link's default navigation.

use std::fmt;
use std::sync::Arc;

/// Outcome reported by an activation handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    /// Let the link navigate normally
    #[default]
    Continue,
    /// The handler substitutes for navigation; prevent the default action
    Handled,
}

/// Handler invoked when a link is activated
pub type ActivateHandler = Arc<dyn Fn(&LinkActivation) -> Activation + Send + Sync>;

/// A link activation event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkActivation {
    target_path: String,
    default_prevented: bool,
}

impl LinkActivation {
    /// Activation of a link pointing at `target_path`
    pub fn new(target_path: impl Into<String>) -> Self {
        Self { target_path: target_path.into(), default_prevented: false }
    }

    /// Path the link points at
    pub fn target_path(&self) -> &str {
        &self.target_path
    }

    /// Prevent the link's default navigation
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether default navigation was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Opaque icon symbol, passed through to the renderer unchanged
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Icon(Arc<str>);

impl Icon {
    /// Wrap an icon symbol
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Self(Arc::from(symbol.as_ref()))
    }

    /// The symbol
    pub fn symbol(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Icon {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

/// One entry of the navigation list
#[derive(Clone)]
pub struct NavLinkEntry {
    /// Visible label
    pub label: Option<String>,
    /// Path the link navigates to
    pub target_path: String,
    /// Optional decoration
    pub icon: Option<Icon>,
    /// Per-link activation handler
    pub on_activate: Option<ActivateHandler>,
}

impl NavLinkEntry {
    /// A link to `target_path` with no label, icon or handler
    pub fn new(target_path: impl Into<String>) -> Self {
        Self { label: None, target_path: target_path.into(), icon: None, on_activate: None }
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the icon
    pub fn with_icon(mut self, icon: impl Into<Icon>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the activation handler
    pub fn on_activate(
        mut self,
        handler: impl Fn(&LinkActivation) -> Activation + Send + Sync + 'static,
    ) -> Self {
        self.on_activate = Some(Arc::new(handler));
        self
    }

    /// Label if present, otherwise the target path
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.target_path)
    }

    /// A fresh activation event for this link
    pub fn activation(&self) -> LinkActivation {
        LinkActivation::new(self.target_path.clone())
    }
}

impl fmt::Debug for NavLinkEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavLinkEntry")
            .field("label", &self.label)
            .field("target_path", &self.target_path)
            .field("icon", &self.icon)
            .field("on_activate", &self.on_activate.is_some())
            .finish()
    }
}
