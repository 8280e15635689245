//! Navbar settings
//!
//! Serializable widget settings, read from camelCase JSON:
//!
//! ```json
//! {
//!   "brandName": "PBS",
//!   "mobileBreakpoint": 768,
//!   "navLinks": [{ "label": "Home", "path": "/", "icon": "home" }],
//!   "themeConfig": { "active": "#38bdf8" },
//!   "logo": { "src": "/logo.svg", "placement": "right" }
//! }
//! ```
//!
//! Every field is optional. Callbacks are not serializable; they are attached
//! to [`crate::navbar::NavbarProps`] with its builder methods.

use navbar_state::{NavLinkEntry, DEFAULT_MOBILE_BREAKPOINT};
use serde::{Deserialize, Serialize};

use crate::components::LogoConfig;
use crate::error::Result;
use crate::theme::ThemeColors;

/// Brand name used when none is configured
pub const DEFAULT_BRAND_NAME: &str = "PBS";

/// One configured link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLinkSettings {
    /// Visible label
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "name")]
    pub label: Option<String>,
    /// Target path
    pub path: String,
    /// Icon symbol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NavLinkSettings {
    /// Link entry without an activation handler
    pub fn to_entry(&self) -> NavLinkEntry {
        let mut entry = NavLinkEntry::new(self.path.clone());
        if let Some(label) = &self.label {
            entry = entry.with_label(label.clone());
        }
        if let Some(icon) = self.icon.as_deref() {
            entry = entry.with_icon(icon);
        }
        entry
    }
}

/// Navbar widget settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavbarSettings {
    /// Text of the brand link
    pub brand_name: String,
    /// Width below which the menu collapses
    pub mobile_breakpoint: f64,
    /// Links in display order
    pub nav_links: Vec<NavLinkSettings>,
    /// Theme colors
    pub theme_config: ThemeColors,
    /// Brand logo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoConfig>,
}

impl Default for NavbarSettings {
    fn default() -> Self {
        Self {
            brand_name: DEFAULT_BRAND_NAME.to_string(),
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            nav_links: Vec::new(),
            theme_config: ThemeColors::default(),
            logo: None,
        }
    }
}

impl NavbarSettings {
    /// Parse settings from JSON and validate the theme colors
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.theme_config.validate()?;
        Ok(settings)
    }

    /// Link entries in display order
    pub fn link_entries(&self) -> Vec<NavLinkEntry> {
        self.nav_links.iter().map(NavLinkSettings::to_entry).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::LogoPlacement;
    use crate::error::UiError;

    #[test]
    fn test_defaults() {
        let settings = NavbarSettings::from_json("{}").unwrap();

        assert_eq!(settings.brand_name, "PBS");
        assert_eq!(settings.mobile_breakpoint, 768.0);
        assert!(settings.nav_links.is_empty());
        assert_eq!(settings.theme_config, ThemeColors::default());
        assert!(settings.logo.is_none());
    }

    #[test]
    fn test_full_settings() {
        let settings = NavbarSettings::from_json(
            r##"{
                "brandName": "Acme",
                "mobileBreakpoint": 1024,
                "navLinks": [
                    { "label": "Home", "path": "/", "icon": "home" },
                    { "name": "Docs", "path": "/docs" },
                    { "path": "/contact" }
                ],
                "themeConfig": { "focus": "#ff00ff" },
                "logo": { "src": "/logo.svg", "placement": "only", "height": 24 }
            }"##,
        )
        .unwrap();

        assert_eq!(settings.brand_name, "Acme");
        assert_eq!(settings.mobile_breakpoint, 1024.0);
        assert_eq!(settings.theme_config.focus, "#ff00ff");

        let logo = settings.logo.as_ref().unwrap();
        assert_eq!(logo.placement, LogoPlacement::Only);
        assert_eq!(logo.height, 24);

        let entries = settings.link_entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].icon.as_ref().map(|i| i.symbol()), Some("home"));
        assert_eq!(entries[1].label.as_deref(), Some("Docs"));
        assert_eq!(entries[2].label, None);
        assert_eq!(entries[2].target_path, "/contact");
    }

    #[test]
    fn test_malformed_json() {
        let err = NavbarSettings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, UiError::Config(_)));
    }

    #[test]
    fn test_invalid_color_rejected() {
        let err = NavbarSettings::from_json(r#"{ "themeConfig": { "active": "" } }"#).unwrap_err();
        assert!(matches!(err, UiError::InvalidColor { field: "active", .. }));
    }

    #[test]
    fn test_link_requires_path() {
        let err = NavbarSettings::from_json(r#"{ "navLinks": [{ "label": "Home" }] }"#).unwrap_err();
        assert!(matches!(err, UiError::Config(_)));
    }
}
