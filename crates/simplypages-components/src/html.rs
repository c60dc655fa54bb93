//! HTML element helpers
//!
//! Shorthand constructors returning an [`ElementBuilder`] for the tags the
//! widget catalog uses.
//!
//! ## Example
//!
//! ```
//! use simplypages_components::html::{div, p};
//!
//! let node = div()
//! 	.class("container")
//! 	.child(p().text("Content").build().unwrap())
//! 	.build()
//! 	.unwrap();
//! assert_eq!(node.render_to_string(), "<div class=\"container\"><p>Content</p></div>");
//! ```

use simplypages_core::{ElementBuilder, Node};

/// Macro for defining HTML element creation functions
macro_rules! define_element {
	($(#[$meta:meta])* $name:ident, $tag:literal) => {
		$(#[$meta])*
		pub fn $name() -> ElementBuilder {
			Node::element($tag)
		}
	};
}

define_element!(
	/// Create a `<div>` element
	div, "div"
);
define_element!(
	/// Create a `<span>` element
	span, "span"
);
define_element!(
	/// Create a `<p>` element
	p, "p"
);
define_element!(h1, "h1");
define_element!(h2, "h2");
define_element!(h3, "h3");
define_element!(h4, "h4");
define_element!(h5, "h5");
define_element!(h6, "h6");
define_element!(
	/// Create a `<ul>` element
	ul, "ul"
);
define_element!(
	/// Create a `<li>` element
	li, "li"
);
define_element!(
	/// Create an `<a>` element; set the target with `.href(...)`
	a, "a"
);
define_element!(
	/// Create an `<img>` element (void)
	img, "img"
);
define_element!(
	/// Create a `<button>` element
	button, "button"
);
define_element!(
	/// Create a `<label>` element
	label, "label"
);
define_element!(
	/// Create an `<input>` element (void)
	input, "input"
);
define_element!(
	/// Create a `<textarea>` element
	textarea, "textarea"
);
define_element!(
	/// Create a `<select>` element
	select, "select"
);
define_element!(
	/// Create an `<option>` element
	option, "option"
);
define_element!(strong, "strong");

/// Create a heading element for `level` 1 through 6; other levels clamp.
pub fn heading(level: u8) -> ElementBuilder {
	match level {
		0 | 1 => h1(),
		2 => h2(),
		3 => h3(),
		4 => h4(),
		5 => h5(),
		_ => h6(),
	}
}
