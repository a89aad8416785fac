//! The tag builder.
//!
//! A [`Tag`] is an append-only buffer of [`Chunk`]s. Elements are described
//! with an [`ElementBuilder`] and written by its [`build`](ElementBuilder::build)
//! method: the opening tag, then the inline content or whatever the nested
//! closure appends, then the closing tag. The nested closure receives the same
//! `Tag`, so nesting needs no parent/child wiring: every element at every
//! depth lands in one buffer, in call order.
//!
//! ```rust
//! use tagline::Tag;
//!
//! let mut t = Tag::new();
//! t.ol()
//!     .children(|t| {
//!         t.li().text("one")?;
//!         t.li().text("two")
//!     })
//!     .unwrap();
//! assert_eq!(t.to_string(), "<ol><li>one</li><li>two</li></ol>");
//! ```

use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::attrs::{AttrValue, Attributes};
use crate::error::{BuildError, Result};
use crate::registry::{self, ElementKind, ElementRegistry, canonical_name};
use crate::{Chunk, trace};

/// Label used in errors for builds without an element name.
const FRAGMENT_LABEL: &str = "#fragment";

/// A nested-construction closure after it has been boxed by
/// [`ElementBuilder::nest`].
pub type Nested<'f, 'a> = Box<dyn FnOnce(&mut Tag<'a>) -> Result<()> + 'f>;

/// An append-only markup buffer.
///
/// Each `Tag` captures the registry snapshot that is current when it is
/// created and uses it for every element it writes.
pub struct Tag<'a> {
    chunks: SmallVec<[Chunk<'a>; 16]>,
    registry: Arc<ElementRegistry>,
}

impl<'a> Tag<'a> {
    /// An empty buffer using the process-wide registry.
    pub fn new() -> Self {
        Self::with_registry(registry::snapshot())
    }

    /// An empty buffer using a specific registry.
    pub fn with_registry(registry: Arc<ElementRegistry>) -> Self {
        Self {
            chunks: SmallVec::new(),
            registry,
        }
    }

    /// Build one element (or, without a name, a fragment) into a fresh buffer.
    ///
    /// The element is void if the process-wide registry says so; the name does
    /// not have to be registered.
    pub fn build<F>(
        name: Option<&str>,
        content: Option<Chunk<'a>>,
        attrs: Attributes<'a>,
        nested: Option<F>,
    ) -> Result<Self>
    where
        F: FnOnce(&mut Tag<'a>) -> Result<()>,
    {
        let mut tag = Self::new();
        let kind = match name {
            Some(name) => tag.registry.kind(name).unwrap_or_default(),
            None => ElementKind::Normal,
        };
        tag.emit(name, kind, content, &attrs, nested)?;
        Ok(tag)
    }

    /// The registry this buffer resolves element names against.
    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Start an element with an arbitrary name.
    ///
    /// The name is written as given and need not be registered. It is void
    /// only if the registry lists it as void.
    pub fn tag(&mut self, name: &str) -> ElementBuilder<'_, 'a> {
        let kind = self.registry.kind(name).unwrap_or_default();
        ElementBuilder::new(self, Some(CompactString::new(name)), Some(kind))
    }

    /// Start a registered element.
    ///
    /// The name is looked up in canonical form (`my_widget` finds
    /// `my-widget`) and written that way. Building fails with
    /// [`BuildError::UnknownElement`] if it is not registered.
    pub fn element(&mut self, name: &str) -> ElementBuilder<'_, 'a> {
        let name = canonical_name(name);
        let kind = self.registry.kind(&name);
        ElementBuilder::new(self, Some(name), kind)
    }

    /// Start a fragment: content or nested output with no enclosing element.
    ///
    /// Attributes given to a fragment are ignored.
    pub fn fragment(&mut self) -> ElementBuilder<'_, 'a> {
        ElementBuilder::new(self, None, Some(ElementKind::Normal))
    }

    /// Append text verbatim. Nothing is escaped.
    pub fn text(&mut self, content: impl Into<Chunk<'a>>) -> &mut Self {
        self.chunks.push(content.into());
        self
    }

    /// Alias of [`text`](Self::text).
    pub fn render(&mut self, content: impl Into<Chunk<'a>>) -> &mut Self {
        self.text(content)
    }

    /// Alias of [`text`](Self::text), for splicing previously built markup.
    pub fn raw(&mut self, markup: impl Into<Chunk<'a>>) -> &mut Self {
        self.text(markup)
    }

    /// Number of chunks appended so far.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Concatenate all chunks.
    pub fn into_string(self) -> String {
        Chunk::concat(&self.chunks)
    }

    pub(crate) fn emit<F>(
        &mut self,
        name: Option<&str>,
        kind: ElementKind,
        content: Option<Chunk<'a>>,
        attrs: &Attributes<'a>,
        nested: Option<F>,
    ) -> Result<()>
    where
        F: FnOnce(&mut Tag<'a>) -> Result<()>,
    {
        let label = name.unwrap_or(FRAGMENT_LABEL);
        if content.is_some() && nested.is_some() {
            trace!(tag = label, "rejected: content and nested block");
            return Err(BuildError::ConflictingContent {
                tag: label.to_owned(),
            });
        }
        let void = kind.is_void();
        if void && (content.is_some() || nested.is_some()) {
            trace!(tag = label, "rejected: void element with content");
            return Err(BuildError::VoidElementContent {
                tag: label.to_owned(),
            });
        }

        trace!(tag = label, ?kind, attrs = attrs.len(), "emit");
        let mark = self.chunks.len();
        if let Some(name) = name {
            let attr_string = attrs.to_attribute_string(&self.registry);
            self.chunks.push(Chunk::open_tag(name, &attr_string));
        }
        if void {
            return Ok(());
        }

        if let Some(content) = content {
            self.chunks.push(content);
        }
        if let Some(nested) = nested
            && let Err(err) = nested(self)
        {
            // drop this element and everything its children wrote
            self.chunks.truncate(mark);
            return Err(err);
        }
        if let Some(name) = name {
            self.chunks.push(Chunk::close_tag(name));
        }
        Ok(())
    }
}

impl Default for Tag<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in &self.chunks {
            f.write_str(chunk.as_str())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag").field("chunks", &self.chunks).finish()
    }
}

/// A pending element, written to its [`Tag`] by [`build`](Self::build).
#[must_use = "an element is only written when `build` is called"]
pub struct ElementBuilder<'t, 'a> {
    tag: &'t mut Tag<'a>,
    name: Option<CompactString>,
    // None means the name is not registered
    kind: Option<ElementKind>,
    content: Option<Chunk<'a>>,
    attrs: Attributes<'a>,
    nested: Option<Nested<'t, 'a>>,
}

impl<'t, 'a> ElementBuilder<'t, 'a> {
    fn new(tag: &'t mut Tag<'a>, name: Option<CompactString>, kind: Option<ElementKind>) -> Self {
        Self {
            tag,
            name,
            kind,
            content: None,
            attrs: Attributes::new(),
            nested: None,
        }
    }

    /// Inline content, written verbatim between the tags.
    pub fn content(mut self, content: impl Into<Chunk<'a>>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn attr(mut self, key: impl Into<Chunk<'a>>, value: impl Into<AttrValue<'a>>) -> Self {
        self.attrs.set(key, value);
        self
    }

    /// Merge a whole attribute mapping; later values win.
    pub fn attrs(mut self, attrs: impl Into<Attributes<'a>>) -> Self {
        self.attrs.merge(attrs.into());
        self
    }

    /// A closure that appends the element's children to the same buffer.
    pub fn nest<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut Tag<'a>) -> Result<()> + 't,
    {
        self.nested = Some(Box::new(f));
        self
    }

    /// Validate and write the element.
    ///
    /// Nothing is written when this fails.
    pub fn build(self) -> Result<()> {
        let Self {
            tag,
            name,
            kind,
            content,
            attrs,
            nested,
        } = self;
        let kind = match (kind, name.as_deref()) {
            (Some(kind), _) => kind,
            (None, Some(name)) => {
                trace!(name, "rejected: unknown element");
                return Err(BuildError::UnknownElement {
                    name: name.to_owned(),
                });
            }
            (None, None) => ElementKind::Normal,
        };
        tag.emit(name.as_deref(), kind, content, &attrs, nested)
    }

    /// Shorthand for `.nest(f).build()`.
    pub fn children<F>(self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Tag<'a>) -> Result<()> + 't,
    {
        self.nest(f).build()
    }

    /// Shorthand for `.content(content).build()`.
    pub fn text(self, content: impl Into<Chunk<'a>>) -> Result<()> {
        self.content(content).build()
    }
}

macro_rules! element_shortcuts {
    ($($method:ident => $name:literal),* $(,)?) => {
        impl<'a> Tag<'a> {
            $(
                #[doc = concat!("Start a `<", $name, ">` element. See [`element`](Self::element).")]
                #[inline]
                pub fn $method(&mut self) -> ElementBuilder<'_, 'a> {
                    self.element($name)
                }
            )*
        }
    };
}

element_shortcuts! {
    // document
    html => "html", head => "head", title => "title", body => "body", meta => "meta",
    link => "link", style => "style", script => "script", noscript => "noscript",
    base => "base", template => "template",
    // sections
    header => "header", footer => "footer", main => "main", nav => "nav",
    section => "section", article => "article", aside => "aside",
    h1 => "h1", h2 => "h2", h3 => "h3", h4 => "h4", h5 => "h5", h6 => "h6",
    // grouping
    div => "div", p => "p", pre => "pre", blockquote => "blockquote", hr => "hr",
    ul => "ul", ol => "ol", li => "li", dl => "dl", dt => "dt", dd => "dd",
    figure => "figure", figcaption => "figcaption",
    // text
    a => "a", span => "span", em => "em", strong => "strong", small => "small",
    code => "code", b => "b", i => "i", u => "u", s => "s", q => "q", sub => "sub",
    sup => "sup", abbr => "abbr", time => "time", br => "br", wbr => "wbr",
    // embedded
    img => "img", picture => "picture", source => "source", video => "video",
    audio => "audio", track => "track", iframe => "iframe", embed => "embed",
    canvas => "canvas",
    // tables
    table => "table", caption => "caption", thead => "thead", tbody => "tbody",
    tfoot => "tfoot", tr => "tr", th => "th", td => "td", col => "col",
    colgroup => "colgroup",
    // forms
    form => "form", label => "label", input => "input", button => "button",
    select => "select", option => "option", optgroup => "optgroup",
    textarea => "textarea", fieldset => "fieldset", legend => "legend",
    details => "details", summary => "summary", dialog => "dialog",
}
