//! Pieces of the output buffer.

use std::fmt;

use compact_str::{CompactString, format_compact};

/// A piece of markup appended to a [`Tag`](crate::Tag) buffer.
///
/// Caller text stays borrowed; tags the builder formats itself are owned.
#[derive(Clone)]
pub enum Chunk<'a> {
    Borrowed(&'a str),
    Owned(CompactString),
}

impl<'a> Chunk<'a> {
    /// `<name>`, or `<name attrs>` when `attrs` is not empty.
    pub(crate) fn open_tag(name: &str, attrs: &str) -> Self {
        let mut open = CompactString::with_capacity(name.len() + attrs.len() + 3);
        open.push('<');
        open.push_str(name);
        if !attrs.is_empty() {
            open.push(' ');
            open.push_str(attrs);
        }
        open.push('>');
        Chunk::Owned(open)
    }

    /// `</name>`
    pub(crate) fn close_tag(name: &str) -> Self {
        Chunk::Owned(format_compact!("</{name}>"))
    }

    /// Join chunks into one string, allocating once.
    pub(crate) fn concat(chunks: &[Chunk<'a>]) -> String {
        let mut out = String::with_capacity(chunks.iter().map(Chunk::len).sum());
        for chunk in chunks {
            out.push_str(chunk.as_str());
        }
        out
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Borrowed(s) => s,
            Self::Owned(s) => s.as_str(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

// Borrowed and owned chunks with the same text are equal.
impl PartialEq for Chunk<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Chunk<'_> {}

impl fmt::Debug for Chunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<'a> From<&'a str> for Chunk<'a> {
    fn from(s: &'a str) -> Self {
        Self::Borrowed(s)
    }
}

impl<'a> From<&'a String> for Chunk<'a> {
    fn from(s: &'a String) -> Self {
        Self::Borrowed(s.as_str())
    }
}

impl From<String> for Chunk<'_> {
    fn from(s: String) -> Self {
        Self::Owned(CompactString::from(s))
    }
}

impl From<CompactString> for Chunk<'_> {
    fn from(s: CompactString) -> Self {
        Self::Owned(s)
    }
}

impl From<Chunk<'_>> for String {
    fn from(chunk: Chunk<'_>) -> Self {
        match chunk {
            Chunk::Borrowed(s) => s.to_owned(),
            Chunk::Owned(s) => s.into_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_open_tag() {
        assert_eq!(Chunk::open_tag("p", "").as_str(), "<p>");
        assert_eq!(
            Chunk::open_tag("img", r#"src="a.png" alt="""#).as_str(),
            r#"<img src="a.png" alt="">"#
        );
    }

    #[test]
    fn test_close_tag() {
        assert_eq!(Chunk::close_tag("my-widget").as_str(), "</my-widget>");
    }

    #[test]
    fn test_concat_mixes_borrowed_and_owned() {
        let chunks = [
            Chunk::open_tag("p", ""),
            Chunk::from("hi"),
            Chunk::from(String::from(" there")),
            Chunk::close_tag("p"),
        ];
        assert_eq!(Chunk::concat(&chunks), "<p>hi there</p>");
        assert_eq!(Chunk::concat(&[]), "");
    }

    #[test]
    fn test_equality_ignores_ownership() {
        assert_eq!(Chunk::from("x"), Chunk::from(String::from("x")));
        assert_eq!(String::from(Chunk::from("y")), "y");
    }
}
