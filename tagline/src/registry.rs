//! The element registry: which names are elements, which of them are void,
//! and which attribute keys are boolean.
//!
//! There is one process-wide registry, seeded with the HTML defaults. It is
//! stored as an immutable snapshot behind a lock: writers clone the current
//! snapshot, change the clone and swap it in, while every [`Tag`](crate::Tag)
//! holds on to the snapshot that was current when it was created. A build in
//! progress therefore never sees a half-applied registration.

use std::sync::Arc;

use compact_str::CompactString;
use facet::Facet;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rapidhash::{RapidHashMap as HashMap, RapidHashSet as HashSet};

use crate::debug;

/// How an element is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Facet)]
#[repr(u8)]
pub enum ElementKind {
    /// Has a closing tag and may enclose content.
    #[default]
    Normal,
    /// Never has a closing tag and may not enclose anything.
    Void,
}

impl ElementKind {
    pub fn is_void(self) -> bool {
        self == ElementKind::Void
    }
}

/// HTML elements that may enclose content.
pub const STANDARD_ELEMENTS: &[&str] = &[
    "a", "abbr", "address", "article", "aside", "audio", "b", "bdi", "bdo", "blockquote", "body",
    "button", "canvas", "caption", "cite", "code", "colgroup", "data", "datalist", "dd", "del",
    "details", "dfn", "dialog", "div", "dl", "dt", "em", "fieldset", "figcaption", "figure",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup", "html", "i",
    "iframe", "ins", "kbd", "label", "legend", "li", "main", "map", "mark", "menu", "meter", "nav",
    "noscript", "object", "ol", "optgroup", "option", "output", "p", "picture", "pre", "progress",
    "q", "rp", "rt", "ruby", "s", "samp", "script", "search", "section", "select", "slot", "small",
    "span", "strong", "style", "sub", "summary", "sup", "table", "tbody", "td", "template",
    "textarea", "tfoot", "th", "thead", "time", "title", "tr", "u", "ul", "var", "video",
];

/// HTML void elements - these never have end tags.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Attributes whose presence, not their value, carries the meaning.
pub const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "allowfullscreen", "async", "autofocus", "autoplay", "checked", "controls", "default",
    "defer", "disabled", "formnovalidate", "hidden", "inert", "ismap", "itemscope", "loop",
    "multiple", "muted", "nomodule", "novalidate", "open", "playsinline", "readonly", "required",
    "reversed", "selected",
];

/// Canonical form of an element name: ASCII lowercase, `_` written as `-`.
pub fn canonical_name(name: &str) -> CompactString {
    name.chars()
        .map(|c| if c == '_' { '-' } else { c.to_ascii_lowercase() })
        .collect()
}

/// A catalog of elements and boolean attributes.
///
/// This is a plain value; the process-wide instance lives behind
/// [`snapshot`] and the free functions of this module.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    elements: HashMap<CompactString, ElementKind>,
    boolean_attributes: HashSet<CompactString>,
}

impl ElementRegistry {
    /// A registry with no elements and no boolean attributes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry seeded with the HTML defaults.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for name in STANDARD_ELEMENTS {
            registry.register(name, ElementKind::Normal);
        }
        for name in VOID_ELEMENTS {
            registry.register(name, ElementKind::Void);
        }
        for key in BOOLEAN_ATTRIBUTES {
            registry.register_boolean(key);
        }
        registry
    }

    /// Register an element. Registering a known name again replaces its kind.
    pub fn register(&mut self, name: &str, kind: ElementKind) {
        self.elements.insert(canonical_name(name), kind);
    }

    /// Remove an element. Unknown names are ignored; returns whether the
    /// name was registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.elements.remove(&canonical_name(name)).is_some()
    }

    /// The kind of a registered element, `None` if the name is unknown.
    pub fn kind(&self, name: &str) -> Option<ElementKind> {
        self.elements.get(&canonical_name(name)).copied()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.kind(name).is_some()
    }

    pub fn is_void(&self, name: &str) -> bool {
        self.kind(name).is_some_and(ElementKind::is_void)
    }

    /// Mark an attribute key as boolean.
    pub fn register_boolean(&mut self, key: &str) {
        self.boolean_attributes.insert(CompactString::new(key));
    }

    /// Returns whether the key was a boolean attribute.
    pub fn unregister_boolean(&mut self, key: &str) -> bool {
        self.boolean_attributes.remove(key)
    }

    /// Boolean attribute lookup, by the key as it is written to the output.
    pub fn is_boolean(&self, key: &str) -> bool {
        self.boolean_attributes.contains(key)
    }
}

static GLOBAL_REGISTRY: Lazy<RwLock<Arc<ElementRegistry>>> =
    Lazy::new(|| RwLock::new(Arc::new(ElementRegistry::with_defaults())));

/// The current process-wide registry.
pub fn snapshot() -> Arc<ElementRegistry> {
    GLOBAL_REGISTRY.read().clone()
}

fn update<R>(f: impl FnOnce(&mut ElementRegistry) -> R) -> R {
    let mut current = GLOBAL_REGISTRY.write();
    let mut next = ElementRegistry::clone(&current);
    let result = f(&mut next);
    *current = Arc::new(next);
    result
}

/// Register an element in the process-wide registry.
///
/// Takes effect for every [`Tag`](crate::Tag) created afterwards.
pub fn register(name: &str, kind: ElementKind) {
    debug!(name, ?kind, "registering element");
    update(|registry| registry.register(name, kind));
}

/// Remove an element from the process-wide registry.
///
/// Unknown names are tolerated; the return value says whether anything was
/// removed.
pub fn unregister(name: &str) -> bool {
    let removed = update(|registry| registry.unregister(name));
    debug!(name, removed, "unregistered element");
    removed
}

/// Mark an attribute key as boolean in the process-wide registry.
pub fn register_boolean(key: &str) {
    debug!(key, "registering boolean attribute");
    update(|registry| registry.register_boolean(key));
}

/// Unmark a boolean attribute key in the process-wide registry.
pub fn unregister_boolean(key: &str) -> bool {
    let removed = update(|registry| registry.unregister_boolean(key));
    debug!(key, removed, "unregistered boolean attribute");
    removed
}

pub fn is_void(name: &str) -> bool {
    snapshot().is_void(name)
}

pub fn is_boolean(key: &str) -> bool {
    snapshot().is_boolean(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_defaults() {
        let registry = ElementRegistry::with_defaults();
        assert!(registry.is_void("img"));
        assert!(registry.is_void("br"));
        assert!(!registry.is_void("div"));
        assert!(registry.is_registered("div"));
        assert!(!registry.is_registered("blink"));
        assert!(registry.is_boolean("selected"));
        assert!(!registry.is_boolean("value"));
        for name in STANDARD_ELEMENTS {
            assert_eq!(registry.kind(name), Some(ElementKind::Normal), "{name}");
        }
        for name in VOID_ELEMENTS {
            assert_eq!(registry.kind(name), Some(ElementKind::Void), "{name}");
        }
    }

    #[test]
    fn test_standard_and_void_are_disjoint() {
        for name in VOID_ELEMENTS {
            assert!(!STANDARD_ELEMENTS.contains(name), "{name} listed twice");
        }
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(canonical_name("My_Widget"), "my-widget");
        let mut registry = ElementRegistry::empty();
        registry.register("Fancy_Box", ElementKind::Normal);
        assert!(registry.is_registered("fancy-box"));
        assert!(registry.is_registered("FANCY_BOX"));
    }

    #[test]
    fn test_reregistration_overwrites_kind() {
        let mut registry = ElementRegistry::with_defaults();
        registry.register("img", ElementKind::Normal);
        assert_eq!(registry.kind("img"), Some(ElementKind::Normal));
        registry.register("img", ElementKind::Void);
        assert!(registry.is_void("img"));
    }

    #[test]
    fn test_unregister_unknown_is_tolerated() {
        let mut registry = ElementRegistry::with_defaults();
        assert!(!registry.unregister("never-registered"));
        assert!(registry.unregister("p"));
        assert!(!registry.is_registered("p"));
        assert!(!registry.unregister("p"));
    }

    #[test]
    fn test_boolean_registration() {
        let mut registry = ElementRegistry::empty();
        assert!(!registry.is_boolean("selected"));
        registry.register_boolean("data-active");
        assert!(registry.is_boolean("data-active"));
        assert!(registry.unregister_boolean("data-active"));
        assert!(!registry.unregister_boolean("data-active"));
    }

    #[test]
    fn test_global_snapshot_is_copy_on_write() {
        let before = snapshot();
        register("registry-test-widget", ElementKind::Void);
        let after = snapshot();

        assert!(!before.is_registered("registry-test-widget"));
        assert!(after.is_void("registry-test-widget"));
        assert!(is_void("registry-test-widget"));

        assert!(unregister("registry-test-widget"));
        assert!(!snapshot().is_registered("registry-test-widget"));
        assert!(after.is_registered("registry-test-widget"));
    }
}
