//! Module storage and page layout
//!
//! Storage is an external collaborator of the editing protocol; the protocol
//! only needs [`ModuleStore`]. [`InMemoryModuleStore`] backs tests and demos.
//!
//! A page renders as
//!
//! ```text
//! div#page-content > div.container > (div.row > div.col-{width} > div.editable-module-wrapper)*
//! ```

use indexmap::IndexMap;
use parking_lot::RwLock;
use simplypages_components::{
	Component, ContentModule, EditMode, EditableModule, Select, SimpleListModule, select_field,
};
use simplypages_conf::EditingSettings;
use simplypages_core::{DomId, Node, Result};

use crate::editable::{Editable, EditableChild, Fields, ValidationOutcome};
use crate::error::Result as EditResult;
use crate::oob::RefreshRegion;

/// Column width of a module that was not given one.
pub const DEFAULT_WIDTH: u8 = 12;

const WIDTH_CHOICES: &[(u8, &str)] = &[
	(3, "1/4 (3/12)"),
	(4, "1/3 (4/12)"),
	(6, "1/2 (6/12)"),
	(8, "2/3 (8/12)"),
	(12, "Full (12/12)"),
];

/// The module kinds the store knows how to edit.
#[derive(Debug, Clone)]
pub enum ModuleContent {
	Content(ContentModule),
	List(SimpleListModule),
}

impl ModuleContent {
	pub fn id(&self) -> &DomId {
		match self {
			ModuleContent::Content(m) => m.id(),
			ModuleContent::List(m) => m.id(),
		}
	}

	pub fn edit_mode(&self) -> EditMode {
		match self {
			ModuleContent::Content(m) => m.edit_mode(),
			ModuleContent::List(m) => m.edit_mode(),
		}
	}

	pub fn as_editable(&self) -> &dyn Editable {
		match self {
			ModuleContent::Content(m) => m,
			ModuleContent::List(m) => m,
		}
	}

	pub fn as_editable_mut(&mut self) -> &mut dyn Editable {
		match self {
			ModuleContent::Content(m) => m,
			ModuleContent::List(m) => m,
		}
	}

	pub fn as_list(&self) -> Option<&SimpleListModule> {
		match self {
			ModuleContent::List(m) => Some(m),
			ModuleContent::Content(_) => None,
		}
	}

	pub fn as_list_mut(&mut self) -> Option<&mut SimpleListModule> {
		match self {
			ModuleContent::List(m) => Some(m),
			ModuleContent::Content(_) => None,
		}
	}

	fn wrap(&self) -> Result<EditableModule> {
		match self {
			ModuleContent::Content(m) => EditableModule::wrap(m),
			ModuleContent::List(m) => EditableModule::wrap(m),
		}
	}
}

/// A new [`ContentModule`] that renders markdown according to
/// [`EditingSettings::markdown_enabled_by_default`].
pub fn content_module(id: impl Into<String>, settings: &EditingSettings) -> Result<ContentModule> {
	Ok(ContentModule::new(id)?.with_markdown(settings.markdown_enabled_by_default))
}

/// A module plus its layout column width.
#[derive(Debug, Clone)]
pub struct StoredModule {
	content: ModuleContent,
	width: u8,
}

impl StoredModule {
	pub fn new(content: ModuleContent) -> Self {
		Self {
			content,
			width: DEFAULT_WIDTH,
		}
	}

	pub fn with_width(mut self, width: u8) -> Self {
		self.width = width;
		self
	}

	pub fn id(&self) -> &DomId {
		self.content.id()
	}

	pub fn width(&self) -> u8 {
		self.width
	}

	/// The module's default edit mode.
	pub fn edit_mode(&self) -> EditMode {
		self.content.edit_mode()
	}

	pub fn content(&self) -> &ModuleContent {
		&self.content
	}

	pub fn content_mut(&mut self) -> &mut ModuleContent {
		&mut self.content
	}

	pub fn editable_children(&self) -> Vec<EditableChild> {
		self.content.as_editable().editable_children()
	}

	/// The module's own fields followed by the width select.
	pub fn edit_view(&self, settings: &EditingSettings) -> Result<Node> {
		let mut select = Select::new("width");
		for (width, label) in WIDTH_CHOICES {
			if settings.parse_width(&width.to_string()).is_some() {
				select = select.option(width.to_string(), *label, *width == self.width);
			}
		}
		Ok(Node::fragment([
			self.content.as_editable().edit_view(settings)?,
			select_field("Module Width", select)?,
		]))
	}

	pub fn validate(&self, fields: &Fields, settings: &EditingSettings) -> ValidationOutcome {
		let mut outcome = self.content.as_editable().validate(fields, settings);
		if let Some(raw) = fields.get("width")
			&& settings.parse_width(raw).is_none()
		{
			outcome.push(format!(
				"Width must be between {} and {}",
				settings.min_module_width, settings.max_module_width
			));
		}
		outcome
	}

	/// Applies validated fields, including the width.
	pub fn apply_edits(&mut self, fields: &Fields, settings: &EditingSettings) {
		self.content.as_editable_mut().apply_edits(fields);
		if let Some(width) = fields.get("width").and_then(|raw| settings.parse_width(raw)) {
			self.width = width;
		}
	}

	/// The module inside its edit/delete wrapper.
	pub fn wrapper(&self, settings: &EditingSettings) -> Result<Node> {
		let id = self.id();
		self.content
			.wrap()?
			.edit_url(settings.route(&format!("/edit/{id}")))
			.edit_mode(self.edit_mode())
			.modal_container(settings.modal_container_id.clone())
			.delete_url(settings.route(&format!("/modules/{id}/delete")))
			.delete_confirm("Are you sure you want to delete this module?")
			.to_node()
	}

	/// The bare module node.
	pub fn to_node(&self) -> Result<Node> {
		match &self.content {
			ModuleContent::Content(m) => m.to_node(),
			ModuleContent::List(m) => m.to_node(),
		}
	}
}

impl From<ContentModule> for StoredModule {
	fn from(module: ContentModule) -> Self {
		Self::new(ModuleContent::Content(module))
	}
}

impl From<SimpleListModule> for StoredModule {
	fn from(module: SimpleListModule) -> Self {
		Self::new(ModuleContent::List(module))
	}
}

/// Where modules live between requests.
pub trait ModuleStore: Send + Sync {
	fn get(&self, id: &str) -> Option<StoredModule>;

	/// Inserts or replaces a module. A replaced module keeps its position.
	fn put(&self, module: StoredModule);

	fn remove(&self, id: &str) -> Option<StoredModule>;

	/// Runs `change` on the stored module with exclusive access, so
	/// concurrent changes never interleave and a concurrent removal is never
	/// undone. Returns the module as stored afterwards, or `None` when `id`
	/// is absent. A failing `change` leaves the module untouched.
	fn update(
		&self,
		id: &str,
		change: &mut dyn FnMut(&mut StoredModule) -> EditResult<()>,
	) -> EditResult<Option<StoredModule>>;

	/// Module ids in page order.
	fn ids(&self) -> Vec<DomId>;

	fn render_page(&self, settings: &EditingSettings) -> Result<Node> {
		PageRenderer::new(settings).page(self)
	}
}

/// Modules in an insertion-ordered map.
#[derive(Debug, Default)]
pub struct InMemoryModuleStore {
	modules: RwLock<IndexMap<String, StoredModule>>,
}

impl InMemoryModuleStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_module(self, module: impl Into<StoredModule>) -> Self {
		self.put(module.into());
		self
	}

	pub fn len(&self) -> usize {
		self.modules.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.modules.read().is_empty()
	}
}

impl ModuleStore for InMemoryModuleStore {
	fn get(&self, id: &str) -> Option<StoredModule> {
		self.modules.read().get(id).cloned()
	}

	fn put(&self, module: StoredModule) {
		self.modules
			.write()
			.insert(module.id().as_str().to_string(), module);
	}

	fn remove(&self, id: &str) -> Option<StoredModule> {
		self.modules.write().shift_remove(id)
	}

	fn update(
		&self,
		id: &str,
		change: &mut dyn FnMut(&mut StoredModule) -> EditResult<()>,
	) -> EditResult<Option<StoredModule>> {
		let mut modules = self.modules.write();
		let Some(stored) = modules.get_mut(id) else {
			return Ok(None);
		};
		let mut updated = stored.clone();
		change(&mut updated)?;
		*stored = updated.clone();
		Ok(Some(updated))
	}

	fn ids(&self) -> Vec<DomId> {
		self.modules
			.read()
			.values()
			.map(|m| m.id().clone())
			.collect()
	}
}

/// Lays out a store's modules.
#[derive(Debug, Clone, Copy)]
pub struct PageRenderer<'a> {
	settings: &'a EditingSettings,
}

impl<'a> PageRenderer<'a> {
	pub fn new(settings: &'a EditingSettings) -> Self {
		Self { settings }
	}

	/// One `div.row > div.col-{width}` per module.
	pub fn rows<S: ModuleStore + ?Sized>(&self, store: &S) -> Result<Node> {
		let mut rows = Vec::new();
		for id in store.ids() {
			let Some(module) = store.get(id.as_str()) else {
				continue;
			};
			let column = Node::element("div")
				.class(&format!("col-{}", module.width()))
				.try_child(module.wrapper(self.settings))
				.build();
			rows.push(Node::element("div").class("row").try_child(column).build()?);
		}
		Ok(Node::fragment(rows))
	}

	/// The module container holding every row.
	pub fn container<S: ModuleStore + ?Sized>(&self, store: &S) -> Result<Node> {
		Node::element("div")
			.class(&self.settings.module_container_class)
			.try_child(self.rows(store))
			.build()
	}

	/// The whole page content.
	pub fn page<S: ModuleStore + ?Sized>(&self, store: &S) -> Result<Node> {
		Node::element("div")
			.id(self.settings.page_container_id.clone())
			.try_child(self.container(store))
			.build()
	}

	/// Refresh of the page-content container.
	pub fn page_region<S: ModuleStore + ?Sized>(&self, store: &S) -> Result<RefreshRegion> {
		Ok(RefreshRegion::PageContent(self.container(store)?))
	}

	/// Refresh of the module container.
	pub fn container_region<S: ModuleStore + ?Sized>(&self, store: &S) -> Result<RefreshRegion> {
		Ok(RefreshRegion::ModuleContainer(self.rows(store)?))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn store() -> InMemoryModuleStore {
		InMemoryModuleStore::new()
			.with_module(
				ContentModule::new("module-1")
					.unwrap()
					.with_title("Intro")
					.with_content("Hello")
					.with_markdown(false),
			)
			.with_module(StoredModule::from(SimpleListModule::new("module-9").unwrap()).with_width(6))
	}

	#[test]
	fn test_page_layout() {
		let html = store()
			.render_page(&EditingSettings::default())
			.unwrap()
			.render_to_string();
		assert!(html.starts_with(
			"<div id=\"page-content\"><div class=\"container\"><div class=\"row\"><div class=\"col-12\"><div class=\"editable-module-wrapper\" id=\"editable-module-1\">"
		));
		assert!(html.contains("<div class=\"row\"><div class=\"col-6\"><div class=\"editable-module-wrapper\" id=\"editable-module-9\">"));
		assert!(html.contains("hx-get=\"/edit/module-1?editMode=owner\""));
		assert!(html.contains("hx-delete=\"/modules/module-1/delete?editMode=owner\""));
	}

	#[test]
	fn test_put_keeps_position() {
		let store = store();
		store.put(
			ContentModule::new("module-1")
				.unwrap()
				.with_content("Replaced")
				.into(),
		);
		let ids: Vec<_> = store.ids().iter().map(|id| id.to_string()).collect();
		assert_eq!(ids, vec!["module-1", "module-9"]);
	}

	#[test]
	fn test_remove_keeps_order() {
		let store = store().with_module(ContentModule::new("module-3").unwrap());
		assert!(store.remove("module-1").is_some());
		assert!(store.remove("module-1").is_none());
		let ids: Vec<_> = store.ids().iter().map(|id| id.to_string()).collect();
		assert_eq!(ids, vec!["module-9", "module-3"]);
	}

	#[test]
	fn test_update_is_all_or_nothing() {
		let store = store();
		let updated = store
			.update("module-9", &mut |module: &mut StoredModule| {
				if let Some(list) = module.content_mut().as_list_mut() {
					list.add_item("Alpha");
				}
				Ok(())
			})
			.unwrap()
			.unwrap();
		assert_eq!(updated.editable_children().len(), 1);

		let failed = store.update("module-9", &mut |module: &mut StoredModule| {
			if let Some(list) = module.content_mut().as_list_mut() {
				list.add_item("Beta");
			}
			Err(crate::error::EditError::BadRequest("refused".to_string()))
		});
		assert!(failed.is_err());
		assert_eq!(store.get("module-9").unwrap().editable_children().len(), 1);

		let absent = store
			.update("module-404", &mut |_: &mut StoredModule| Ok(()))
			.unwrap();
		assert!(absent.is_none());
		assert!(store.get("module-404").is_none());
	}

	#[test]
	fn test_concurrent_adds_get_distinct_ids() {
		let store = std::sync::Arc::new(store());
		let handles: Vec<_> = (0..8)
			.map(|n| {
				let store = std::sync::Arc::clone(&store);
				std::thread::spawn(move || {
					store
						.update("module-9", &mut |module: &mut StoredModule| {
							if let Some(list) = module.content_mut().as_list_mut() {
								list.add_item(format!("Item {n}"));
							}
							Ok(())
						})
						.unwrap();
				})
			})
			.collect();
		for handle in handles {
			handle.join().unwrap();
		}
		let mut ids: Vec<_> = store
			.get("module-9")
			.unwrap()
			.editable_children()
			.into_iter()
			.map(|child| child.id)
			.collect();
		assert_eq!(ids.len(), 8);
		ids.sort();
		ids.dedup();
		assert_eq!(ids.len(), 8);
	}

	#[rstest::rstest]
	#[case(true)]
	#[case(false)]
	fn test_content_module_follows_markdown_setting(#[case] enabled: bool) {
		let settings = EditingSettings {
			markdown_enabled_by_default: enabled,
			..EditingSettings::default()
		};
		let module = content_module("module-5", &settings).unwrap();
		assert_eq!(module.use_markdown(), enabled);
	}

	#[test]
	fn test_edit_view_has_width_select() {
		let module = store().get("module-9").unwrap();
		let html = module
			.edit_view(&EditingSettings::default())
			.unwrap()
			.render_to_string();
		assert!(html.contains("<p class=\"form-label\">Module Width:</p>"));
		assert!(html.contains("<option value=\"6\" selected>1/2 (6/12)</option>"));
	}

	#[test]
	fn test_width_validation() {
		let module = store().get("module-1").unwrap();
		let mut fields = Fields::new();
		fields.insert("content".into(), "x".into());
		fields.insert("width".into(), "13".into());
		let outcome = module.validate(&fields, &EditingSettings::default());
		assert_eq!(outcome.message(), "Width must be between 1 and 12");
	}

	#[test]
	fn test_apply_edits_sets_width() {
		let mut module = store().get("module-1").unwrap();
		let mut fields = Fields::new();
		fields.insert("content".into(), "x".into());
		fields.insert("width".into(), "4".into());
		module.apply_edits(&fields, &EditingSettings::default());
		assert_eq!(module.width(), 4);
	}
}
