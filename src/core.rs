//! Render tree module.
//!
//! # Examples
//!
//! ```rust
//! use simplypages::core::Node;
//!
//! let node = Node::element("p").text("1 < 2").build().unwrap();
//! assert_eq!(node.render_to_string(), "<p>1 &lt; 2</p>");
//! ```

pub use simplypages_core::*;
