//! # SimplyPages Core
//!
//! The render tree and the injection-defense boundary.
//!
//! - [`Node`] / [`Element`]: the tree, built through [`ElementBuilder`] and
//!   rendered with a [`RenderContext`]
//! - [`AttributeSet`] / [`ClassList`]: ordered attributes with class-token
//!   accumulation
//! - [`security`]: text and attribute encoding, URL allow-listing, CSS length
//!   grammar, DOM-id validation
//! - [`Markdown`]: markdown conversion whose output is sandboxed before it is
//!   treated as markup
//!
//! Rendering is pure and synchronous. All validation happens while a tree
//! is constructed and surfaces as a [`ValidationError`].

pub mod attributes;
pub mod context;
pub mod error;
pub mod markdown;
pub mod node;
pub mod security;

pub use attributes::{AttributeSet, ClassList, StyleMap};
pub use context::{MAX_DEPTH, RenderContext, RenderContextBuilder, SlotKey};
pub use error::{Result, ValidationError};
pub use markdown::{Markdown, MarkdownConfig};
pub use node::{ChildStream, Element, ElementBuilder, IntoNode, Node, Render, Surround};
pub use security::{ClassToken, DomId};
