//! Child streams: lazily produced children around the declared ones.

use std::fmt;

use super::Node;

/// Produces the effective children of an element at render time.
///
/// A stream receives the declared children and may place synthetic nodes
/// before or after them. The declared list itself is never modified, and
/// the output must be the same for the same input so renders stay
/// byte-stable.
pub trait ChildStream: Send + Sync + fmt::Debug {
	/// Returns the children to render, in order.
	fn stream<'a>(&'a self, declared: &'a [Node]) -> Box<dyn Iterator<Item = &'a Node> + 'a>;
}

/// Places fixed nodes before and after the declared children.
#[derive(Debug, Clone, Default)]
pub struct Surround {
	before: Vec<Node>,
	after: Vec<Node>,
}

impl Surround {
	pub fn new(before: Vec<Node>, after: Vec<Node>) -> Self {
		Self { before, after }
	}

	/// Renders `nodes` ahead of the declared children.
	pub fn prepend(nodes: Vec<Node>) -> Self {
		Self::new(nodes, Vec::new())
	}

	/// Renders `nodes` after the declared children.
	pub fn append(nodes: Vec<Node>) -> Self {
		Self::new(Vec::new(), nodes)
	}
}

impl ChildStream for Surround {
	fn stream<'a>(&'a self, declared: &'a [Node]) -> Box<dyn Iterator<Item = &'a Node> + 'a> {
		Box::new(
			self.before
				.iter()
				.chain(declared.iter())
				.chain(self.after.iter()),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_surround_order() {
		let stream = Surround::new(vec![Node::text("a")], vec![Node::text("c")]);
		let declared = vec![Node::text("b")];
		let out: String = stream
			.stream(&declared)
			.map(Node::render_to_string)
			.collect();
		assert_eq!(out, "abc");
		assert_eq!(declared.len(), 1);
	}

	#[test]
	fn test_prepend_and_append() {
		let declared = vec![Node::text("x")];
		let pre: Vec<_> = Surround::prepend(vec![Node::text("p")])
			.stream(&declared)
			.map(Node::render_to_string)
			.collect();
		assert_eq!(pre, vec!["p", "x"]);
		let post: Vec<_> = Surround::append(vec![Node::text("q")])
			.stream(&declared)
			.map(Node::render_to_string)
			.collect();
		assert_eq!(post, vec!["x", "q"]);
	}
}
