//! Build HTML by composing closures instead of templates.
//!
//! tagline provides:
//! - **Tag builder**: an append-only buffer where every element, at any
//!   depth, is written by method calls on the same [`Tag`]
//! - **Element registry**: which names are elements, which are void, and
//!   which attributes are boolean, extensible at runtime
//! - **Entry points**: [`html`] / [`html_with`] for fragments and full
//!   documents with a DOCTYPE line
//!
//! Nothing is escaped. tagline assembles strings; callers escape untrusted
//! text themselves.
//!
//! # Example
//!
//! ```rust
//! use tagline::{MarkupOptions, html_with};
//!
//! let out = html_with(MarkupOptions::new().document().attr("lang", "en"), |t| {
//!     t.body().children(|t| {
//!         t.h1().text("Menu")?;
//!         t.select().attr("name", "dish").children(|t| {
//!             t.option().attr("value", "soup").attr("selected", true).text("Soup")?;
//!             t.option().attr("value", "salad").attr("selected", false).text("Salad")
//!         })?;
//!         t.img().attr("src", "menu.jpg").attr("data_kind", "photo").build()
//!     })
//! })
//! .unwrap();
//!
//! assert_eq!(
//!     out,
//!     concat!(
//!         r#"<!DOCTYPE html><html lang="en"><body><h1>Menu</h1>"#,
//!         r#"<select name="dish"><option value="soup" selected>Soup</option>"#,
//!         r#"<option value="salad">Salad</option></select>"#,
//!         r#"<img src="menu.jpg" data-kind="photo"></body></html>"#,
//!     )
//! );
//! ```

mod tracing_macros;

pub mod attrs;
mod chunk;
mod error;
mod markup;
pub mod registry;
mod tag;

pub(crate) use tracing_macros::{debug, trace};

pub use attrs::{AttrValue, Attributes};
pub use chunk::Chunk;
pub use error::{BuildError, Result};
pub use markup::{Doctype, MarkupOptions, html, html_with, markup, markup_with};
pub use registry::{ElementKind, ElementRegistry};
pub use tag::{ElementBuilder, Nested, Tag};
