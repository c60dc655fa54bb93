//! `ul.list-group`

use simplypages_core::{IntoNode, Node, Result};

use super::Extras;
use crate::component::Component;
use crate::html::{li, ul};

/// A list whose entries each render as `li.list-group-item`.
#[derive(Debug, Clone, Default)]
pub struct ListGroup {
	items: Vec<Node>,
	extras: Extras,
}

impl ListGroup {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an entry. Strings become escaped text.
	pub fn item(mut self, content: impl IntoNode) -> Self {
		self.items.push(content.into_node());
		self
	}

	pub fn items(mut self, contents: impl IntoIterator<Item = impl IntoNode>) -> Self {
		self.items
			.extend(contents.into_iter().map(IntoNode::into_node));
		self
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

extras_setters!(ListGroup);

impl Component for ListGroup {
	fn name(&self) -> &'static str {
		"ListGroup"
	}

	fn to_node(&self) -> Result<Node> {
		let mut builder = self.extras.apply(ul().class("list-group"));
		for item in &self.items {
			builder = builder.try_child(li().class("list-group-item").child(item.clone()).build());
		}
		builder.build()
	}
}
