//! Theme colors
//!
//! The navigation bar's colors are configurable per theme and published as
//! CSS custom properties on the document root, so style rules can switch
//! between them with the `data-theme` attribute alone:
//!
//! | property | source |
//! |---|---|
//! | `--text-color-light` / `--text-color-dark` | `light.text` / `dark.text` |
//! | `--bg-color-light` / `--bg-color-dark` | `light.background` / `dark.background` |
//! | `--active-link-color-light` / `--active-link-color-dark` | `active` |
//! | `--focus-color` | `focus` |
//!
//! # Usage
//!
//! ```rust
//! use navbar_ui::theme::ThemeColors;
//! use navbar_state::Document;
//!
//! let document = Document::new();
//! ThemeColors::default().apply(&document).unwrap();
//! assert_eq!(document.style_property("--focus-color").as_deref(), Some("#4d90fe"));
//! ```

use navbar_state::Document;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UiError};

// =============================================================================
// Color Types
// =============================================================================

/// A CSS color value (`#38bdf8`, `rgb(56 189 248)`, `teal`, ...)
pub type Color = String;

fn validate(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() || value.chars().any(char::is_control) {
        return Err(UiError::InvalidColor { field, value: value.to_string() });
    }
    Ok(())
}

// =============================================================================
// Theme Colors
// =============================================================================

/// Text and background colors of one theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeColors {
    /// Foreground text
    pub text: Color,
    /// Bar background
    pub background: Color,
}

impl ModeColors {
    /// Colors from text and background values
    pub fn new(text: impl Into<Color>, background: impl Into<Color>) -> Self {
        Self { text: text.into(), background: background.into() }
    }
}

/// Colors of both themes plus shared accents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    /// Light theme colors
    pub light: ModeColors,
    /// Dark theme colors
    pub dark: ModeColors,
    /// Color of the active link in both themes
    pub active: Color,
    /// Focus ring color
    pub focus: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            light: ModeColors::new("#000", "#fff"),
            dark: ModeColors::new("#fff", "#000"),
            active: "#38bdf8".to_string(),
            focus: "#4d90fe".to_string(),
        }
    }
}

impl ThemeColors {
    /// Check that every color is a usable CSS value
    pub fn validate(&self) -> Result<()> {
        validate("light.text", &self.light.text)?;
        validate("light.background", &self.light.background)?;
        validate("dark.text", &self.dark.text)?;
        validate("dark.background", &self.dark.background)?;
        validate("active", &self.active)?;
        validate("focus", &self.focus)
    }

    /// Custom properties to publish, in a stable order
    pub fn css_properties(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("--active-link-color-light", self.active.as_str()),
            ("--text-color-light", self.light.text.as_str()),
            ("--bg-color-light", self.light.background.as_str()),
            ("--active-link-color-dark", self.active.as_str()),
            ("--text-color-dark", self.dark.text.as_str()),
            ("--bg-color-dark", self.dark.background.as_str()),
            ("--focus-color", self.focus.as_str()),
        ]
    }

    /// Validate and publish the colors on the document root
    pub fn apply(&self, document: &Document) -> Result<()> {
        self.validate()?;
        for (name, value) in self.css_properties() {
            document.set_style_property(name, value);
        }
        tracing::debug!("theme colors applied");
        Ok(())
    }
}
