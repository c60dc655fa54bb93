//! A titled list of text items.

use simplypages_core::{DomId, Node, Result};

use crate::component::Component;
use crate::html::p;
use crate::module::{EditMode, Module};
use crate::widgets::ListGroup;

/// Shown in place of the list when there are no items.
pub const EMPTY_LIST_TEXT: &str = "No items yet. Add items to see them here.";

/// One entry of a [`SimpleListModule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
	id: DomId,
	text: String,
}

impl ListItem {
	pub fn id(&self) -> &DomId {
		&self.id
	}

	pub fn text(&self) -> &str {
		&self.text
	}
}

/// A module whose items are editable children.
///
/// Items added without an explicit id are numbered `item-0`, `item-1`, ...
/// Numbers are never reused after a removal.
#[derive(Debug, Clone)]
pub struct SimpleListModule {
	id: DomId,
	title: Option<String>,
	items: Vec<ListItem>,
	next_index: usize,
	edit_mode: EditMode,
}

impl SimpleListModule {
	pub fn new(id: impl Into<String>) -> Result<Self> {
		Ok(Self {
			id: DomId::new(id)?,
			title: None,
			items: Vec::new(),
			next_index: 0,
			edit_mode: EditMode::default(),
		})
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn with_item(mut self, text: impl Into<String>) -> Self {
		self.add_item(text);
		self
	}

	pub fn with_edit_mode(mut self, mode: EditMode) -> Self {
		self.edit_mode = mode;
		self
	}

	pub fn id(&self) -> &DomId {
		&self.id
	}

	pub fn title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	pub fn set_title(&mut self, title: Option<String>) {
		self.title = title;
	}

	pub fn edit_mode(&self) -> EditMode {
		self.edit_mode
	}

	pub fn items(&self) -> &[ListItem] {
		&self.items
	}

	fn allocate_id(&mut self) -> DomId {
		loop {
			let candidate = format!("item-{}", self.next_index);
			self.next_index += 1;
			if self.find_item(&candidate).is_none() {
				// `item-<n>` is always a valid id.
				if let Ok(id) = DomId::new(candidate) {
					return id;
				}
			}
		}
	}

	/// Appends an item and returns its id.
	pub fn add_item(&mut self, text: impl Into<String>) -> DomId {
		let id = self.allocate_id();
		self.items.push(ListItem {
			id: id.clone(),
			text: text.into(),
		});
		id
	}

	/// Inserts or replaces the item with `id`.
	pub fn put_item(&mut self, id: impl Into<String>, text: impl Into<String>) -> Result<()> {
		let id = DomId::new(id)?;
		let text = text.into();
		match self.items.iter_mut().find(|item| item.id == id) {
			Some(item) => item.text = text,
			None => self.items.push(ListItem { id, text }),
		}
		Ok(())
	}

	/// Replaces the text of an existing item. Returns `false` if absent.
	pub fn update_item(&mut self, id: &str, text: impl Into<String>) -> bool {
		match self.items.iter_mut().find(|item| item.id.as_str() == id) {
			Some(item) => {
				item.text = text.into();
				true
			}
			None => false,
		}
	}

	/// Removes an item. Returns the removed item, or `None` if absent.
	pub fn remove_item(&mut self, id: &str) -> Option<ListItem> {
		let position = self.items.iter().position(|item| item.id.as_str() == id)?;
		Some(self.items.remove(position))
	}

	pub fn find_item(&self, id: &str) -> Option<&ListItem> {
		self.items.iter().find(|item| item.id.as_str() == id)
	}

	pub fn to_module(&self) -> Result<Module> {
		let body = if self.items.is_empty() {
			p().class("text-muted").text(EMPTY_LIST_TEXT).build()
		} else {
			ListGroup::new()
				.items(self.items.iter().map(|item| item.text.clone()))
				.to_node()
		};
		let mut builder = Module::builder(self.id.as_str())
			.kind("simple-list-module")
			.title_level(3)
			.edit_mode(self.edit_mode)
			.try_child(body);
		if let Some(title) = &self.title {
			builder = builder.title(title.clone());
		}
		builder.build()
	}
}

impl Component for SimpleListModule {
	fn name(&self) -> &'static str {
		"SimpleListModule"
	}

	fn to_node(&self) -> Result<Node> {
		self.to_module()?.to_node()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> SimpleListModule {
		SimpleListModule::new("module-9")
			.unwrap()
			.with_title("Nested Editing Demo")
			.with_item("First")
			.with_item("Second")
	}

	#[test]
	fn test_render_items() {
		assert_eq!(
			sample().render().unwrap(),
			"<div id=\"module-9\" class=\"module simple-list-module\"><h3 class=\"module-title\">Nested Editing Demo</h3><ul class=\"list-group\"><li class=\"list-group-item\">First</li><li class=\"list-group-item\">Second</li></ul></div>"
		);
	}

	#[test]
	fn test_render_empty() {
		let html = SimpleListModule::new("module-9").unwrap().render().unwrap();
		assert_eq!(
			html,
			"<div id=\"module-9\" class=\"module simple-list-module\"><p class=\"text-muted\">No items yet. Add items to see them here.</p></div>"
		);
	}

	#[test]
	fn test_ids_are_not_reused() {
		let mut list = sample();
		assert!(list.remove_item("item-1").is_some());
		let id = list.add_item("Third");
		assert_eq!(id.as_str(), "item-2");
		let ids: Vec<_> = list.items().iter().map(|i| i.id().as_str()).collect();
		assert_eq!(ids, vec!["item-0", "item-2"]);
	}

	#[test]
	fn test_allocation_skips_explicit_ids() {
		let mut list = SimpleListModule::new("m").unwrap();
		list.put_item("item-0", "explicit").unwrap();
		assert_eq!(list.add_item("auto").as_str(), "item-1");
	}

	#[test]
	fn test_update_and_remove_absent() {
		let mut list = sample();
		assert!(list.update_item("item-0", "Changed"));
		assert_eq!(list.find_item("item-0").unwrap().text(), "Changed");
		assert!(!list.update_item("item-7", "x"));
		assert!(list.remove_item("item-7").is_none());
		assert_eq!(list.items().len(), 2);
	}

	#[test]
	fn test_put_item_rejects_bad_id() {
		let mut list = sample();
		assert!(list.put_item("bad id", "x").is_err());
	}
}
