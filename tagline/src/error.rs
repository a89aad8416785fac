//! Errors raised while building markup.

use facet::Facet;

/// Errors that can occur while constructing an element.
///
/// All of them are raised before the offending element writes anything to
/// the buffer, and they abort the whole build: nested closures propagate them
/// with `?` up to the entry point.
#[derive(Facet, Debug, Clone, PartialEq, Eq)]
#[facet(derive(Error))]
#[repr(u8)]
pub enum BuildError {
    /// element `{tag}` was given both inline content and a nested block
    ConflictingContent { tag: String },

    /// void element `{tag}` cannot enclose content
    VoidElementContent { tag: String },

    /// no element named `{name}` is registered
    UnknownElement { name: String },
}

/// Result type used throughout tagline.
pub type Result<T, E = BuildError> = std::result::Result<T, E>;
