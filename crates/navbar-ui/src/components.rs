//! Navigation bar components
//!
//! Components render to a framework-neutral [`Element`] tree with
//! serializable properties, which the host turns into real markup. Each
//! render function is pure: it reads the state it is given and returns the
//! element, carrying the class markers from [`crate::tokens::classes`] and the
//! accessibility attributes the widget guarantees.
//!
//! # Available Components
//!
//! - [`brand`] - Brand link with optional logo
//! - [`nav_list`] / [`nav_item`] - The link list and its items
//! - [`menu_toggle`] - Mobile menu button
//! - [`theme_toggle`] - Light/dark switch

use navbar_state::{NavLinkEntry, NodeId, ThemeValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::navigation::RouteMatcher;
use crate::tokens::{aria, classes, icons, ids, sizing};

// =============================================================================
// Element Tree
// =============================================================================

/// A rendered node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Text content
    Text(String),
}

/// A rendered element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Element {
    /// Tag name
    pub tag: String,
    /// Attributes, sorted by name
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub attributes: BTreeMap<String, String>,
    /// Class markers, in insertion order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub classes: Vec<String>,
    /// Children
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<Node>,
    /// Document node backing this element, for hit testing
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub node: Option<NodeId>,
}

impl Element {
    /// Create an element with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Default::default() }
    }

    /// Set an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add a class marker
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add a class marker when `condition` holds
    pub fn class_if(self, class: impl Into<String>, condition: bool) -> Self {
        if condition {
            self.class(class)
        } else {
            self
        }
    }

    /// Append a child element
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append a child element if present
    pub fn child_opt(self, child: Option<Element>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    /// Append text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Bind the element to a document node
    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    /// Attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the element carries `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Child elements, skipping text
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First element in depth-first order (including `self`) matching `predicate`
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find(predicate))
    }

    /// Every element in depth-first order matching `predicate`
    pub fn find_all(&self, predicate: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(predicate, &mut found);
        found
    }

    fn collect<'a>(&'a self, predicate: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if predicate(self) {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect(predicate, found);
        }
    }

    /// Element with the given `id` attribute
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find(&|e| e.attribute("id") == Some(id))
    }

    /// Element carrying the given class marker
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.find(&|e| e.has_class(class))
    }

    /// Concatenated text of the subtree
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                Node::Text(t) => text.push_str(t),
                Node::Element(e) => text.push_str(&e.text_content()),
            }
        }
        text
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn icon(symbol: &str) -> Element {
    Element::new("svg")
        .attr("data-icon", symbol)
        .attr("aria-hidden", "true")
        .class(classes::ICON)
}

// =============================================================================
// Brand
// =============================================================================

/// Where the logo sits relative to the brand name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoPlacement {
    /// Logo before the name
    #[default]
    Left,
    /// Logo after the name
    Right,
    /// Logo styled as the whole brand; the name stays for assistive technology
    Only,
}

/// Brand logo settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogoConfig {
    /// Image source; no image is rendered without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Alternative text, defaulting to "<brand> logo"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Extra class for the image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Placement relative to the brand name
    pub placement: LogoPlacement,
    /// Image height in pixels
    pub height: u32,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self { src: None, alt: None, class_name: None, placement: LogoPlacement::Left, height: sizing::LOGO_HEIGHT }
    }
}

impl LogoConfig {
    /// Logo from an image source
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: Some(src.into()), ..Default::default() }
    }

    /// Set the placement
    pub fn placement(mut self, placement: LogoPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the alternative text
    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Set the height
    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }
}

/// Brand link to the root path
pub fn brand(brand_name: &str, logo: Option<&LogoConfig>, theme: ThemeValue) -> Element {
    let image = logo.and_then(|logo| {
        let src = logo.src.as_deref()?;
        let alt = match logo.alt.as_deref() {
            Some(alt) if !alt.is_empty() => alt.to_string(),
            _ => format!("{brand_name} logo"),
        };
        let mut image = Element::new("img")
            .attr("src", src)
            .attr("alt", alt)
            .attr("style", format!("height: {}px; width: auto", logo.height))
            .class(classes::BRAND_IMAGE);
        if let Some(extra) = logo.class_name.as_deref().filter(|c| !c.is_empty()) {
            image = image.class(extra);
        }
        Some(image)
    });
    let placement = logo.map(|logo| logo.placement).unwrap_or_default();

    let link = Element::new("a")
        .attr("href", "/")
        .class(classes::BRAND)
        .class(theme.as_str())
        .class_if(classes::BRAND_WITH_IMAGE, image.is_some())
        .class_if(classes::IMAGE_ONLY, logo.is_some_and(|l| l.placement == LogoPlacement::Only));

    if brand_name.is_empty() {
        return link.child_opt(image);
    }

    let name = Element::new("span").class(classes::BRAND_TEXT).text(brand_name);
    match placement {
        LogoPlacement::Right => link.child(name).child_opt(image),
        _ => link.child_opt(image).child(name),
    }
}

// =============================================================================
// Link List
// =============================================================================

/// State the link list renders from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListState {
    /// Menu open flag
    pub open: bool,
    /// Mobile classification
    pub mobile: bool,
    /// Current theme
    pub theme: ThemeValue,
}

/// One list item
pub fn nav_item(entry: &NavLinkEntry, active: bool, theme: ThemeValue) -> Element {
    let content = Element::new("span")
        .class(classes::CONTENT)
        .child_opt(entry.icon.as_ref().map(|i| icon(i.symbol())));
    let content = match entry.label.as_deref() {
        Some(label) => content.child(Element::new("span").text(label)),
        None => content,
    };

    let link = Element::new("a")
        .attr("href", entry.target_path.as_str())
        .attr("tabindex", "0")
        .attr("aria-label", entry.display_label())
        .class(classes::NAV_LINK)
        .class(theme.as_str())
        .class_if(classes::ACTIVE, active)
        .child(content);

    Element::new("li").attr("role", aria::ROLE_MENU_ITEM).class(classes::NAV_ITEM).child(link)
}

/// The link list
pub fn nav_list(entries: &[NavLinkEntry], state: ListState, matcher: &dyn RouteMatcher) -> Element {
    let list = Element::new("ul")
        .attr("id", ids::NAV_MENU)
        .attr("role", aria::ROLE_MENU)
        .attr("aria-expanded", bool_attr(state.open))
        .attr("aria-label", aria::MAIN_MENU)
        .class(classes::NAV_LIST)
        .class(state.theme.as_str())
        .class_if(classes::MOBILE_MENU, state.mobile)
        .class_if(classes::HIDDEN, !state.open)
        .class_if(classes::OPEN, state.open);

    entries.iter().fold(list, |list, entry| {
        list.child(nav_item(entry, matcher.is_active(&entry.target_path), state.theme))
    })
}

// =============================================================================
// Toggles
// =============================================================================

/// Button opening and closing the mobile menu
pub fn menu_toggle(open: bool) -> Element {
    let (label, symbol) = if open { (aria::CLOSE_MENU, icons::CLOSE) } else { (aria::OPEN_MENU, icons::MENU) };

    Element::new("button")
        .attr("type", "button")
        .attr("aria-label", label)
        .attr("aria-expanded", bool_attr(open))
        .attr("aria-controls", ids::NAV_MENU)
        .class(classes::MENU_BUTTON)
        .child(icon(symbol))
}

/// Button switching between light and dark
pub fn theme_toggle(theme: ThemeValue) -> Element {
    let symbol = match theme {
        ThemeValue::Light => icons::MOON,
        ThemeValue::Dark => icons::SUN,
    };

    Element::new("button")
        .attr("type", "button")
        .attr("aria-label", format!("Switch to {} mode", theme.toggled()))
        .class(classes::THEME_BUTTON)
        .child(icon(symbol).class(theme.as_str()))
}
