//! Navbar composition
//!
//! [`Navbar`] mounts one navigation bar on a document: it publishes the
//! theme colors, creates the document nodes its elements are bound to, and
//! wires the theme handle, a viewport classifier and a menu controller
//! together. User intents go through [`Navbar::toggle_menu`],
//! [`Navbar::toggle_theme`] and [`Navbar::activate_link`], which press the
//! corresponding node first so the outside-interaction detector sees the
//! same interaction the browser would deliver.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use navbar_state::{Document, ThemeContext, ControlledTheme, ThemeValue};
//! use navbar_ui::navbar::{Navbar, NavbarProps};
//! use navbar_state::NavLinkEntry;
//!
//! let document = Document::new();
//! let theme = ThemeContext::provide(Arc::new(ControlledTheme::new(ThemeValue::Light, |_| {})));
//! let props = NavbarProps::default().link(NavLinkEntry::new("/about").with_label("About"));
//!
//! let navbar = Navbar::mount(&document, props, &theme).unwrap();
//! navbar.viewport().hydrate(375.0);
//! navbar.toggle_menu();
//! assert!(navbar.menu().is_open());
//! ```

use navbar_state::{
    Activation, ActivateHandler, Document, LinkActivation, MenuOptions, NavLinkEntry,
    NavMenuController, NodeId, RegionHandle, ThemeContext, ThemeControl, ViewportClassifier,
};
use std::fmt;
use std::sync::Arc;

use crate::components::{self, Element, ListState, LogoConfig, Node};
use crate::config::NavbarSettings;
use crate::error::Result;
use crate::navigation::{CurrentLocation, RouteMatcher};
use crate::theme::ThemeColors;
use crate::tokens::{aria, classes};

// =============================================================================
// Props
// =============================================================================

/// Everything a navbar is mounted with
#[derive(Clone)]
pub struct NavbarProps {
    /// Serializable settings
    pub settings: NavbarSettings,
    /// Link entries, in display order
    pub links: Vec<NavLinkEntry>,
    /// Global link handler
    pub on_nav_item_click: Option<ActivateHandler>,
    /// Active-route predicate
    pub route_matcher: Arc<dyn RouteMatcher>,
}

impl Default for NavbarProps {
    fn default() -> Self {
        Self::new(NavbarSettings::default())
    }
}

impl fmt::Debug for NavbarProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavbarProps")
            .field("settings", &self.settings)
            .field("links", &self.links)
            .field("on_nav_item_click", &self.on_nav_item_click.is_some())
            .finish()
    }
}

impl NavbarProps {
    /// Props from settings; links come from `settings.nav_links`
    pub fn new(settings: NavbarSettings) -> Self {
        let links = settings.link_entries();
        Self {
            settings,
            links,
            on_nav_item_click: None,
            route_matcher: Arc::new(CurrentLocation::default()),
        }
    }

    /// Set the brand name
    pub fn brand_name(mut self, name: impl Into<String>) -> Self {
        self.settings.brand_name = name.into();
        self
    }

    /// Set the mobile breakpoint
    pub fn mobile_breakpoint(mut self, breakpoint: f64) -> Self {
        self.settings.mobile_breakpoint = breakpoint;
        self
    }

    /// Set the brand logo
    pub fn logo(mut self, logo: LogoConfig) -> Self {
        self.settings.logo = Some(logo);
        self
    }

    /// Set the theme colors
    pub fn theme_colors(mut self, colors: ThemeColors) -> Self {
        self.settings.theme_config = colors;
        self
    }

    /// Replace the links
    pub fn links(mut self, links: Vec<NavLinkEntry>) -> Self {
        self.links = links;
        self
    }

    /// Append a link
    pub fn link(mut self, link: NavLinkEntry) -> Self {
        self.links.push(link);
        self
    }

    /// Set the global link handler
    pub fn on_nav_item_click(
        mut self,
        handler: impl Fn(&LinkActivation) -> Activation + Send + Sync + 'static,
    ) -> Self {
        self.on_nav_item_click = Some(Arc::new(handler));
        self
    }

    /// Set the active-route predicate
    pub fn route_matcher(mut self, matcher: impl RouteMatcher + 'static) -> Self {
        self.route_matcher = Arc::new(matcher);
        self
    }
}

// =============================================================================
// Navbar
// =============================================================================

#[derive(Debug)]
struct Nodes {
    header: NodeId,
    nav: NodeId,
    brand: NodeId,
    list: NodeId,
    items: Vec<NodeId>,
    toggles: NodeId,
    menu_toggle: Option<NodeId>,
    theme_toggle: NodeId,
}

impl Nodes {
    fn create(document: &Document, link_count: usize) -> Self {
        let header = document.create_node(Document::ROOT);
        let nav = document.create_node(header);
        let brand = document.create_node(nav);
        let list = document.create_node(nav);
        let items = (0..link_count).map(|_| document.create_node(list)).collect();
        let toggles = document.create_node(nav);
        let menu_toggle = (link_count > 0).then(|| document.create_node(toggles));
        let theme_toggle = document.create_node(toggles);

        Self { header, nav, brand, list, items, toggles, menu_toggle, theme_toggle }
    }
}

/// A mounted navigation bar
pub struct Navbar {
    document: Document,
    settings: NavbarSettings,
    links: Vec<NavLinkEntry>,
    route_matcher: Arc<dyn RouteMatcher>,
    theme: Arc<dyn ThemeControl>,
    viewport: ViewportClassifier,
    menu: NavMenuController,
    nodes: Nodes,
}

impl fmt::Debug for Navbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navbar")
            .field("brand_name", &self.settings.brand_name)
            .field("links", &self.links.len())
            .field("theme", &self.theme.theme())
            .field("viewport", &self.viewport)
            .field("menu", &self.menu)
            .finish()
    }
}

impl Navbar {
    /// Mount a navbar on `document`
    ///
    /// Fails when `theme` provides no theme or the theme colors are invalid.
    pub fn mount(document: &Document, props: NavbarProps, theme: &ThemeContext) -> Result<Self> {
        let theme = theme.use_theme("Navbar")?;
        props.settings.theme_config.apply(document)?;

        let nodes = Nodes::create(document, props.links.len());
        let viewport = ViewportClassifier::new(props.settings.mobile_breakpoint);
        let menu = NavMenuController::mount(
            document,
            RegionHandle::attached(nodes.list),
            viewport.clone(),
            MenuOptions { on_nav_item_click: props.on_nav_item_click },
        );

        tracing::debug!(
            brand = %props.settings.brand_name,
            links = props.links.len(),
            breakpoint = viewport.breakpoint(),
            "navbar mounted"
        );

        Ok(Self {
            document: document.clone(),
            settings: props.settings,
            links: props.links,
            route_matcher: props.route_matcher,
            theme,
            viewport,
            menu,
            nodes,
        })
    }

    /// Render the current state
    pub fn render(&self) -> Element {
        let theme = self.theme.theme();
        let state = ListState { open: self.menu.is_open(), mobile: self.viewport.is_mobile(), theme };

        let mut list = components::nav_list(&self.links, state, self.route_matcher.as_ref())
            .with_node(self.nodes.list);
        for (child, node) in list.children.iter_mut().zip(&self.nodes.items) {
            if let Node::Element(item) = child {
                item.node = Some(*node);
            }
        }

        let toggles = Element::new("div")
            .class(classes::TOGGLES)
            .with_node(self.nodes.toggles)
            .child_opt(self.nodes.menu_toggle.map(|node| components::menu_toggle(state.open).with_node(node)))
            .child(components::theme_toggle(theme).with_node(self.nodes.theme_toggle));

        let brand = components::brand(&self.settings.brand_name, self.settings.logo.as_ref(), theme)
            .with_node(self.nodes.brand);

        let nav = Element::new("nav")
            .attr("role", aria::ROLE_NAVIGATION)
            .attr("aria-label", aria::MAIN_NAVIGATION)
            .class(classes::NAV)
            .with_node(self.nodes.nav)
            .child(brand)
            .child(list)
            .child(toggles);

        Element::new("header")
            .attr("role", aria::ROLE_BANNER)
            .class(classes::HEADER)
            .class(theme.as_str())
            .with_node(self.nodes.header)
            .child(nav)
    }

    /// Press the menu toggle; returns `false` when there is none
    pub fn toggle_menu(&self) -> bool {
        let Some(node) = self.nodes.menu_toggle else {
            tracing::debug!("menu toggle pressed without links");
            return false;
        };
        let interaction = self.document.pointer_down(node);
        self.menu.toggle_for(interaction);
        true
    }

    /// Press the theme toggle
    pub fn toggle_theme(&self) {
        self.document.pointer_down(self.nodes.theme_toggle);
        self.theme.toggle_theme();
    }

    /// Press the link at `index`; the returned event tells whether to navigate
    pub fn activate_link(&self, index: usize) -> Option<LinkActivation> {
        let entry = self.links.get(index)?;
        if let Some(node) = self.nodes.items.get(index) {
            self.document.pointer_down(*node);
        }
        Some(self.menu.activate(entry))
    }

    /// Menu controller
    pub fn menu(&self) -> &NavMenuController {
        &self.menu
    }

    /// Viewport classifier fed by the host's measurements
    pub fn viewport(&self) -> &ViewportClassifier {
        &self.viewport
    }

    /// Theme handle
    pub fn theme(&self) -> &Arc<dyn ThemeControl> {
        &self.theme
    }

    /// Link entries
    pub fn links(&self) -> &[NavLinkEntry] {
        &self.links
    }

    /// Document the navbar is mounted on
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Node of the header element
    pub fn header_node(&self) -> NodeId {
        self.nodes.header
    }

    /// Node of the link list
    pub fn list_node(&self) -> NodeId {
        self.nodes.list
    }

    /// Node of the menu toggle, when rendered
    pub fn menu_toggle_node(&self) -> Option<NodeId> {
        self.nodes.menu_toggle
    }

    /// Unmount, releasing listeners and detaching the navbar's nodes
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for Navbar {
    fn drop(&mut self) {
        self.document.remove_node(self.nodes.header);
        tracing::debug!("navbar unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UiError;
    use crate::tokens::ids;
    use navbar_state::{ControlledTheme, StateError, ThemeController, ThemeValue};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storage::{MemoryBackend, StoreAdapter};

    // =============================================================================
    // Fixtures
    // =============================================================================

    fn controller(document: &Document) -> ThemeController {
        ThemeController::new(Arc::new(StoreAdapter::new(MemoryBackend::new())))
            .with_surface(Arc::new(document.clone()))
    }

    fn provide(controller: &ThemeController) -> ThemeContext {
        ThemeContext::provide(Arc::new(controller.clone()))
    }

    fn props() -> NavbarProps {
        NavbarProps::default()
            .link(NavLinkEntry::new("/").with_label("Home"))
            .link(NavLinkEntry::new("/about").with_label("About"))
    }

    fn mount_mobile(document: &Document, props: NavbarProps) -> (Navbar, ThemeController) {
        let controller = controller(document);
        let navbar = Navbar::mount(document, props, &provide(&controller)).unwrap();
        navbar.viewport().hydrate(375.0);
        (navbar, controller)
    }

    // =============================================================================
    // Mounting
    // =============================================================================

    #[test]
    fn test_mount_without_provider_fails() {
        let document = Document::new();
        let err = Navbar::mount(&document, props(), &ThemeContext::empty()).unwrap_err();

        assert!(matches!(err, UiError::State(StateError::ContextMissing { consumer: "Navbar" })));
        assert_eq!(document.pointer_listener_count(), 0);
    }

    #[test]
    fn test_mount_rejects_invalid_colors() {
        let document = Document::new();
        let colors = ThemeColors { active: String::new(), ..ThemeColors::default() };
        let err = Navbar::mount(&document, props().theme_colors(colors), &provide(&controller(&document)))
            .unwrap_err();

        assert!(matches!(err, UiError::InvalidColor { field: "active", .. }));
    }

    #[test]
    fn test_mount_accepts_functional_and_named_colors() {
        let document = Document::new();
        let colors = ThemeColors {
            active: "rgb(56, 189, 248)".to_string(),
            focus: "teal".to_string(),
            ..ThemeColors::default()
        };
        let _navbar = Navbar::mount(&document, props().theme_colors(colors), &provide(&controller(&document)))
            .unwrap();

        assert_eq!(document.style_property("--active-link-color-light").as_deref(), Some("rgb(56, 189, 248)"));
        assert_eq!(document.style_property("--focus-color").as_deref(), Some("teal"));
    }

    #[test]
    fn test_mount_publishes_colors() {
        let document = Document::new();
        let _navbar = Navbar::mount(&document, props(), &provide(&controller(&document))).unwrap();

        assert_eq!(document.style_property("--bg-color-dark").as_deref(), Some("#000"));
        assert_eq!(document.style_property("--focus-color").as_deref(), Some("#4d90fe"));
    }

    // =============================================================================
    // Rendering
    // =============================================================================

    #[test]
    fn test_render_structure() {
        let document = Document::new();
        let (navbar, _controller) = mount_mobile(&document, props());
        let header = navbar.render();

        assert_eq!(header.tag, "header");
        assert_eq!(header.attribute("role"), Some("banner"));
        assert!(header.has_class("light"));

        let nav = header.find(&|e| e.tag == "nav").unwrap();
        assert_eq!(nav.attribute("aria-label"), Some("Main navigation"));

        let list = header.find_by_id(ids::NAV_MENU).unwrap();
        assert_eq!(list.node, Some(navbar.list_node()));
        assert!(list.has_class(classes::MOBILE_MENU));
        assert!(list.has_class(classes::HIDDEN));
        assert!(list.child_elements().all(|item| item.node.is_some()));

        assert!(header.find_by_class(classes::MENU_BUTTON).is_some());
        assert!(header.find_by_class(classes::THEME_BUTTON).is_some());
        assert_eq!(header.find_by_class(classes::BRAND).unwrap().text_content(), "PBS");
    }

    #[test]
    fn test_empty_links_render_no_menu_toggle() {
        let document = Document::new();
        let (navbar, _controller) = mount_mobile(&document, NavbarProps::default());
        let header = navbar.render();

        assert!(header.find_by_class(classes::MENU_BUTTON).is_none());
        assert!(header.find(&|e| e.attribute("aria-controls").is_some()).is_none());
        assert!(navbar.menu_toggle_node().is_none());
        assert!(!navbar.toggle_menu());
        assert!(!navbar.menu().is_open());
    }

    #[test]
    fn test_desktop_before_hydration() {
        let document = Document::new();
        let controller = controller(&document);
        let navbar = Navbar::mount(&document, props(), &provide(&controller)).unwrap();
        navbar.viewport().resize(375.0);

        let list = navbar.render();
        let list = list.find_by_id(ids::NAV_MENU).unwrap();
        assert!(!list.has_class(classes::MOBILE_MENU));
    }

    #[test]
    fn test_active_link_follows_location() {
        let document = Document::new();
        let location = CurrentLocation::new("/about/team");
        let (navbar, _controller) = mount_mobile(&document, props().route_matcher(location.clone()));

        let header = navbar.render();
        let active: Vec<_> = header
            .find_all(&|e| e.has_class(classes::ACTIVE))
            .into_iter()
            .filter_map(|e| e.attribute("href"))
            .collect();
        assert_eq!(active, vec!["/about"]);

        location.navigate("/");
        let header = navbar.render();
        let active = header.find_all(&|e| e.has_class(classes::ACTIVE));
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].attribute("href"), Some("/"));
    }

    // =============================================================================
    // Intents
    // =============================================================================

    #[test]
    fn test_toggle_menu_opens_and_closes() {
        let document = Document::new();
        let (navbar, _controller) = mount_mobile(&document, props());

        assert!(navbar.toggle_menu());
        assert!(navbar.menu().is_open());
        let header = navbar.render();
        let button = header.find_by_class(classes::MENU_BUTTON).unwrap();
        assert_eq!(button.attribute("aria-label"), Some("Close menu"));
        assert!(header.find_by_id(ids::NAV_MENU).unwrap().has_class(classes::OPEN));

        assert!(navbar.toggle_menu());
        assert!(!navbar.menu().is_open());
    }

    #[test]
    fn test_theme_toggle_flips_and_dismisses_menu() {
        let document = Document::new();
        let (navbar, controller) = mount_mobile(&document, props());
        navbar.toggle_menu();

        navbar.toggle_theme();

        assert_eq!(controller.theme(), ThemeValue::Dark);
        assert_eq!(document.attribute("data-theme").as_deref(), Some("dark"));
        assert!(!navbar.menu().is_open());
        let header = navbar.render();
        assert!(header.has_class("dark"));
        assert_eq!(
            header.find_by_class(classes::THEME_BUTTON).unwrap().attribute("aria-label"),
            Some("Switch to light mode")
        );
    }

    #[test]
    fn test_link_activation_on_mobile_closes_menu() {
        let document = Document::new();
        let (navbar, _controller) = mount_mobile(&document, props());
        navbar.toggle_menu();

        let activation = navbar.activate_link(1).unwrap();

        assert_eq!(activation.target_path(), "/about");
        assert!(!activation.is_default_prevented());
        assert!(!navbar.menu().is_open());
        assert!(navbar.activate_link(5).is_none());
    }

    #[test]
    fn test_global_handler_prevents_default() {
        let document = Document::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        let props = props().on_nav_item_click(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            Activation::Handled
        });
        let (navbar, _controller) = mount_mobile(&document, props);

        navbar.toggle_menu();
        let activation = navbar.activate_link(0).unwrap();

        assert!(activation.is_default_prevented());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!navbar.menu().is_open());
    }

    #[test]
    fn test_controlled_theme_composition() {
        let document = Document::new();
        let requested = Arc::new(Mutex::new(Vec::new()));
        let r = Arc::clone(&requested);
        let controlled = Arc::new(ControlledTheme::new(ThemeValue::Dark, move |next| r.lock().push(next)));
        let context = ThemeContext::provide(controlled.clone());

        let navbar = Navbar::mount(&document, props(), &context).unwrap();
        assert!(navbar.render().has_class("dark"));

        navbar.toggle_theme();
        assert_eq!(*requested.lock(), vec![ThemeValue::Light]);
        assert!(navbar.render().has_class("dark"));

        controlled.sync(ThemeValue::Light);
        assert!(navbar.render().has_class("light"));
    }

    // =============================================================================
    // Lifetime
    // =============================================================================

    #[test]
    fn test_unmount_releases_everything() {
        let document = Document::new();
        let (navbar, _controller) = mount_mobile(&document, props());
        let header = navbar.header_node();
        assert_eq!(document.pointer_listener_count(), 1);
        assert_eq!(document.key_listener_count(), 1);

        navbar.unmount();

        assert_eq!(document.pointer_listener_count(), 0);
        assert_eq!(document.key_listener_count(), 0);
        assert!(!document.is_connected(header));
    }
}
