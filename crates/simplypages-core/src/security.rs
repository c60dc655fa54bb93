//! Escaping and injection-defense boundary.
//!
//! Every value that reaches rendered markup passes through one of the sinks
//! in this module:
//!
//! - [`escape`]: text and attribute-value encoding
//! - [`url`]: scheme allow-listing for `href`/`src` targets
//! - [`css`]: constrained grammar for style and dimension values
//! - [`ident`]: DOM id, class token and attribute-name validation
//!
//! Validation functions fail fast with a [`ValidationError`](crate::ValidationError)
//! and are called while a tree is being built, never while it is rendered.

pub mod css;
pub mod escape;
pub mod ident;
pub mod url;

pub use css::{validate_css_length, validate_style_property, validate_style_value};
pub use escape::{escape_attr, escape_text, escape_url};
pub use ident::{
	ClassToken, DomId, validate_attribute_name, validate_class_token, validate_dom_id,
	validate_modal_id,
};
pub use url::{is_safe_url, validate_image_src, validate_url};
