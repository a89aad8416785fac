//! Attribute mappings and their serialization.
//!
//! Keys are written the way Rust identifiers read (`data_foo`) and come out the
//! way HTML expects them (`data-foo`). A key starting with `!` opts out of that
//! translation: the `!` is stripped and the rest is written untouched, which is
//! how camelCase or otherwise unusual attribute names get through.
//!
//! Values are never escaped.

use std::borrow::Cow;
use std::fmt::Write;

use compact_str::{CompactString, ToCompactString};

use crate::Chunk;
use crate::registry::ElementRegistry;

/// The value side of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue<'a> {
    /// Dropped before serialization, like an empty string.
    Absent,
    /// Written as `key="value"`.
    Text(Chunk<'a>),
    /// Presence/absence for registered boolean attributes, `key="true"` or
    /// `key="false"` for everything else.
    Bool(bool),
}

impl AttrValue<'_> {
    /// Whether this entry is filtered out before serialization.
    pub fn is_dropped(&self) -> bool {
        match self {
            AttrValue::Absent => true,
            AttrValue::Text(text) => text.is_empty(),
            AttrValue::Bool(_) => false,
        }
    }
}

impl<'a> From<&'a str> for AttrValue<'a> {
    fn from(s: &'a str) -> Self {
        AttrValue::Text(Chunk::Borrowed(s))
    }
}

impl<'a> From<&'a String> for AttrValue<'a> {
    fn from(s: &'a String) -> Self {
        AttrValue::Text(Chunk::Borrowed(s.as_str()))
    }
}

impl From<String> for AttrValue<'_> {
    fn from(s: String) -> Self {
        AttrValue::Text(Chunk::from(s))
    }
}

impl From<CompactString> for AttrValue<'_> {
    fn from(s: CompactString) -> Self {
        AttrValue::Text(Chunk::Owned(s))
    }
}

impl<'a> From<Chunk<'a>> for AttrValue<'a> {
    fn from(chunk: Chunk<'a>) -> Self {
        AttrValue::Text(chunk)
    }
}

impl From<bool> for AttrValue<'_> {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl<'a, T: Into<AttrValue<'a>>> From<Option<T>> for AttrValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrValue::Absent, Into::into)
    }
}

macro_rules! attr_value_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for AttrValue<'_> {
                fn from(n: $ty) -> Self {
                    AttrValue::Text(Chunk::Owned(n.to_compact_string()))
                }
            }
        )*
    };
}

attr_value_from_display!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, char);

/// An ordered key/value mapping of attributes.
///
/// Insertion order is output order. Setting a key that is already present
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes<'a> {
    entries: Vec<(Chunk<'a>, AttrValue<'a>)>,
}

impl<'a> Attributes<'a> {
    /// Create a new empty attribute mapping.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: impl Into<Chunk<'a>>, value: impl Into<AttrValue<'a>>) -> Self {
        self.set(key, value);
        self
    }

    /// Set an attribute. An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<Chunk<'a>>, value: impl Into<AttrValue<'a>>) {
        let key = key.into();
        let value = value.into();
        if let Some((_, v)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            *v = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Get the value for a raw (untransformed) key.
    pub fn get(&self, key: &str) -> Option<&AttrValue<'a>> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    /// Remove an attribute by raw key. Returns the old value if it existed.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue<'a>> {
        let pos = self.entries.iter().position(|(k, _)| k.as_str() == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Merge `other` into `self`; later values win.
    pub fn merge(&mut self, other: Attributes<'a>) {
        for (key, value) in other.entries {
            self.set(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in insertion order, raw keys included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue<'a>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize to the text that goes between the tag name and `>`.
    ///
    /// Empty when every entry is dropped. Pieces are joined by one space and
    /// there is no leading space.
    pub fn to_attribute_string(&self, registry: &ElementRegistry) -> String {
        let mut out = String::new();
        for (raw_key, value) in &self.entries {
            let key = transform_key(raw_key.as_str());
            let sep = if out.is_empty() { "" } else { " " };
            match value {
                AttrValue::Absent => {}
                AttrValue::Text(text) if text.is_empty() => {}
                AttrValue::Bool(present) if registry.is_boolean(&key) => {
                    if *present {
                        let _ = write!(out, "{sep}{key}");
                    }
                }
                AttrValue::Bool(b) => {
                    let _ = write!(out, "{sep}{key}=\"{b}\"");
                }
                AttrValue::Text(text) => {
                    let _ = write!(out, "{sep}{key}=\"{}\"", text.as_str());
                }
            }
        }
        out
    }
}

impl<'a, K, V> FromIterator<(K, V)> for Attributes<'a>
where
    K: Into<Chunk<'a>>,
    V: Into<AttrValue<'a>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.set(key, value);
        }
        attrs
    }
}

impl<'a, K, V, const N: usize> From<[(K, V); N]> for Attributes<'a>
where
    K: Into<Chunk<'a>>,
    V: Into<AttrValue<'a>>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for Attributes<'a> {
    type Item = (Chunk<'a>, AttrValue<'a>);
    type IntoIter = std::vec::IntoIter<(Chunk<'a>, AttrValue<'a>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Translate a raw attribute key into the name written to the output.
///
/// A leading `!` is stripped and nothing else changes; otherwise every `_`
/// becomes `-`.
pub fn transform_key(raw: &str) -> Cow<'_, str> {
    if let Some(rest) = raw.strip_prefix('!') {
        Cow::Borrowed(rest)
    } else if raw.contains('_') {
        Cow::Owned(raw.replace('_', "-"))
    } else {
        Cow::Borrowed(raw)
    }
}
