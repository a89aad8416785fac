//! Top-level entry points.

use facet::Facet;

use crate::attrs::{AttrValue, Attributes};
use crate::error::Result;
use crate::registry::ElementKind;
use crate::{Chunk, Tag, debug};

/// The `<!DOCTYPE ...>` line written before a document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Facet)]
#[repr(u8)]
pub enum Doctype {
    /// No DOCTYPE line.
    Omit,
    /// `<!DOCTYPE html>`
    #[default]
    Html,
    /// `<!DOCTYPE {0}>`
    Custom(String),
}

impl Doctype {
    /// The declaration line, or nothing for [`Doctype::Omit`].
    pub fn declaration(&self) -> Option<String> {
        match self {
            Doctype::Omit => None,
            Doctype::Html => Some("<!DOCTYPE html>".to_owned()),
            Doctype::Custom(content) => Some(format!("<!DOCTYPE {content}>")),
        }
    }
}

/// Options for [`html`] and [`html_with`].
///
/// Without [`document`](Self::document) the output is a fragment: the
/// content or closure output with no enclosing element, and any attributes are
/// ignored. With it, everything is wrapped in `<html>` carrying the
/// attributes, preceded by the DOCTYPE line.
#[derive(Clone, Debug, Default)]
pub struct MarkupOptions<'a> {
    /// Inline content for the root.
    pub content: Option<Chunk<'a>>,
    /// Wrap the output in `<html>` and write the DOCTYPE (default: false).
    pub document: bool,
    /// Only used when `document` is set (default: `<!DOCTYPE html>`).
    pub doctype: Doctype,
    /// Attributes for the root `<html>` element.
    pub attrs: Attributes<'a>,
}

impl<'a> MarkupOptions<'a> {
    /// Create new default options (a fragment).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<Chunk<'a>>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Build a full document.
    pub fn document(mut self) -> Self {
        self.document = true;
        self
    }

    pub fn doctype(mut self, doctype: Doctype) -> Self {
        self.doctype = doctype;
        self
    }

    /// Leave out the DOCTYPE line.
    pub fn no_doctype(self) -> Self {
        self.doctype(Doctype::Omit)
    }

    pub fn attr(mut self, key: impl Into<Chunk<'a>>, value: impl Into<AttrValue<'a>>) -> Self {
        self.attrs.set(key, value);
        self
    }

    pub fn attrs(mut self, attrs: impl Into<Attributes<'a>>) -> Self {
        self.attrs.merge(attrs.into());
        self
    }
}

/// Build markup without a closure.
///
/// ```rust
/// use tagline::{MarkupOptions, html};
///
/// let out = html(MarkupOptions::new().document().attr("lang", "en")).unwrap();
/// assert_eq!(out, r#"<!DOCTYPE html><html lang="en"></html>"#);
/// ```
pub fn html(options: MarkupOptions<'_>) -> Result<String> {
    run(options, None::<fn(&mut Tag<'_>) -> Result<()>>)
}

/// Build markup, with `f` appending the children of the root.
///
/// ```rust
/// use tagline::{MarkupOptions, html_with};
///
/// let out = html_with(MarkupOptions::new(), |t| {
///     t.p().attr("class", "super").children(|t| t.span().text("Hello!"))
/// })
/// .unwrap();
/// assert_eq!(out, r#"<p class="super"><span>Hello!</span></p>"#);
/// ```
pub fn html_with<'a, F>(options: MarkupOptions<'a>, f: F) -> Result<String>
where
    F: FnOnce(&mut Tag<'a>) -> Result<()>,
{
    run(options, Some(f))
}

pub use self::html as markup;
pub use self::html_with as markup_with;

fn run<'a, F>(options: MarkupOptions<'a>, f: Option<F>) -> Result<String>
where
    F: FnOnce(&mut Tag<'a>) -> Result<()>,
{
    let MarkupOptions {
        content,
        document,
        doctype,
        attrs,
    } = options;

    let mut tag = Tag::new();
    let mut out = String::new();
    if document {
        if let Some(declaration) = doctype.declaration() {
            out.push_str(&declaration);
        }
        tag.emit(Some("html"), ElementKind::Normal, content, &attrs, f)?;
    } else {
        if !attrs.is_empty() {
            debug!(count = attrs.len(), "fragment build: ignoring root attributes");
        }
        tag.emit(None, ElementKind::Normal, content, &attrs, f)?;
    }
    out.push_str(&tag.into_string());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_document_with_doctype() {
        let out = html(MarkupOptions::new().document()).unwrap();
        assert_eq!(out, "<!DOCTYPE html><html></html>");
    }

    #[test]
    fn test_document_without_doctype() {
        let out = html(MarkupOptions::new().document().no_doctype()).unwrap();
        assert_eq!(out, "<html></html>");
    }

    #[test]
    fn test_custom_doctype() {
        let d = r#"HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd""#;
        let out = html(
            MarkupOptions::new()
                .document()
                .doctype(Doctype::Custom(d.to_owned())),
        )
        .unwrap();
        assert_eq!(out, format!("<!DOCTYPE {d}><html></html>"));
    }

    #[test]
    fn test_document_content_argument() {
        let out = html(MarkupOptions::new().content("something").document().no_doctype()).unwrap();
        assert_eq!(out, "<html>something</html>");
    }

    #[test]
    fn test_document_with_closure_and_attrs() {
        let out = html_with(MarkupOptions::new().document().attr("lang", "en"), |t| {
            t.text("something");
            Ok(())
        })
        .unwrap();
        assert_eq!(out, r#"<!DOCTYPE html><html lang="en">something</html>"#);
    }

    #[test]
    fn test_doctype_ignored_for_fragments() {
        let out = html(MarkupOptions::new().content("x").doctype(Doctype::Html)).unwrap();
        assert_eq!(out, "x");
    }

    #[test]
    fn test_fragment_ignores_root_attrs() {
        let out = html_with(MarkupOptions::new().attr("lang", "en"), |t| t.p().build()).unwrap();
        assert_eq!(out, "<p></p>");
    }

    #[test]
    fn test_root_conflict() {
        let err = html_with(MarkupOptions::new().content("x"), |t| t.p().build()).unwrap_err();
        assert!(matches!(err, crate::BuildError::ConflictingContent { ref tag } if tag == "#fragment"));
    }
}
