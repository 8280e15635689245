//! Presentation tokens for the navigation bar
//!
//! Class markers, element ids, accessible labels and sizes shared by the
//! components. Style rules key off these names; the visual meaning of each
//! marker is defined by the stylesheet, not here.

// =============================================================================
// Class Markers
// =============================================================================

/// Class names set on rendered elements
pub mod classes {
    /// Menu is open
    pub const OPEN: &str = "open";
    /// Menu is closed
    pub const HIDDEN: &str = "hidden";
    /// Link points at the current location
    pub const ACTIVE: &str = "active";
    /// Menu is laid out for a mobile viewport
    pub const MOBILE_MENU: &str = "mobileMenu";

    /// Header bar
    pub const HEADER: &str = "header";
    /// Navigation landmark
    pub const NAV: &str = "nav";
    /// Link list
    pub const NAV_LIST: &str = "navList";
    /// List item
    pub const NAV_ITEM: &str = "navItem";
    /// Anchor inside a list item
    pub const NAV_LINK: &str = "navLink";
    /// Icon and label wrapper
    pub const CONTENT: &str = "content";
    /// Icon decoration
    pub const ICON: &str = "icon";

    /// Brand link
    pub const BRAND: &str = "brand";
    /// Brand link carrying a logo
    pub const BRAND_WITH_IMAGE: &str = "brandWithImage";
    /// Brand link showing only the logo
    pub const IMAGE_ONLY: &str = "imageOnly";
    /// Brand logo image
    pub const BRAND_IMAGE: &str = "brandImage";
    /// Brand name text
    pub const BRAND_TEXT: &str = "brandText";

    /// Wrapper around the two toggles
    pub const TOGGLES: &str = "menuAndThemeToggle";
    /// Menu toggle button
    pub const MENU_BUTTON: &str = "menuButton";
    /// Theme toggle button
    pub const THEME_BUTTON: &str = "themeButton";
}

// =============================================================================
// Element Ids
// =============================================================================

/// Ids referenced across elements
pub mod ids {
    /// The link list, referenced by the menu toggle's `aria-controls`
    pub const NAV_MENU: &str = "nav-menu";
}

// =============================================================================
// Accessible Labels
// =============================================================================

/// ARIA roles and labels
pub mod aria {
    /// Label of the `nav` landmark
    pub const MAIN_NAVIGATION: &str = "Main navigation";
    /// Label of the link list
    pub const MAIN_MENU: &str = "Main menu";
    /// Menu toggle label while closed
    pub const OPEN_MENU: &str = "Open menu";
    /// Menu toggle label while open
    pub const CLOSE_MENU: &str = "Close menu";

    /// Role of the header
    pub const ROLE_BANNER: &str = "banner";
    /// Role of the `nav` element
    pub const ROLE_NAVIGATION: &str = "navigation";
    /// Role of the link list
    pub const ROLE_MENU: &str = "menu";
    /// Role of each list item
    pub const ROLE_MENU_ITEM: &str = "menuitem";
}

// =============================================================================
// Icons
// =============================================================================

/// Built-in icon symbols
pub mod icons {
    /// Menu toggle while closed
    pub const MENU: &str = "menu";
    /// Menu toggle while open
    pub const CLOSE: &str = "x";
    /// Theme toggle in light mode
    pub const MOON: &str = "moon";
    /// Theme toggle in dark mode
    pub const SUN: &str = "sun";
}

// =============================================================================
// Sizing
// =============================================================================

/// Component dimensions
pub mod sizing {
    /// Default brand logo height (px)
    pub const LOGO_HEIGHT: u32 = 32;
}
