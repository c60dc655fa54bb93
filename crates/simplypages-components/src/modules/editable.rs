//! Edit and delete affordances around a rendered module.

use simplypages_core::security::validate_url;
use simplypages_core::{DomId, Node, Result};

use crate::component::{Component, Variant};
use crate::html::div;
use crate::module::EditMode;
use crate::widgets::Button;

/// Wraps a module's node in `div.editable-module-wrapper` with an edit
/// button (opens the edit modal) and a delete button.
///
/// The wrapper's own id is `editable-<module id>`. The delete button targets
/// the wrapper unless another target is given.
///
/// # Examples
///
/// ```
/// use simplypages_components::{Component, ContentModule, EditMode, EditableModule};
///
/// let module = ContentModule::new("module-1").unwrap().with_content("Hi");
/// let wrapper = EditableModule::wrap(&module)
/// 	.unwrap()
/// 	.edit_url("/edit/module-1")
/// 	.edit_mode(EditMode::UserEdit);
/// let html = wrapper.render().unwrap();
/// assert!(html.contains("hx-get=\"/edit/module-1?editMode=user\""));
/// ```
#[derive(Debug, Clone)]
pub struct EditableModule {
	module_id: DomId,
	content: Node,
	can_edit: bool,
	can_delete: bool,
	edit_mode: Option<EditMode>,
	edit_url: Option<String>,
	edit_label: String,
	modal_container_id: String,
	delete_url: Option<String>,
	delete_label: String,
	delete_target: Option<String>,
	delete_confirm: Option<String>,
}

impl EditableModule {
	/// Wraps an already rendered module node.
	pub fn new(module_id: DomId, content: Node) -> Self {
		Self {
			module_id,
			content,
			can_edit: true,
			can_delete: true,
			edit_mode: None,
			edit_url: None,
			edit_label: "\u{270f}".to_string(),
			modal_container_id: "edit-modal-container".to_string(),
			delete_url: None,
			delete_label: "\u{1f5d1}".to_string(),
			delete_target: None,
			delete_confirm: None,
		}
	}

	/// Builds `module` and wraps it.
	pub fn wrap<M>(module: &M) -> Result<Self>
	where
		M: Component + HasModuleId,
	{
		Ok(Self::new(module.module_id().clone(), module.to_node()?))
	}

	pub fn can_edit(mut self, allowed: bool) -> Self {
		self.can_edit = allowed;
		self
	}

	pub fn can_delete(mut self, allowed: bool) -> Self {
		self.can_delete = allowed;
		self
	}

	/// Appends `editMode=<mode>` to the edit and delete URLs.
	pub fn edit_mode(mut self, mode: EditMode) -> Self {
		self.edit_mode = Some(mode);
		self
	}

	pub fn edit_url(mut self, url: impl Into<String>) -> Self {
		self.edit_url = Some(url.into());
		self
	}

	pub fn edit_label(mut self, label: impl Into<String>) -> Self {
		self.edit_label = label.into();
		self
	}

	/// Id of the element the edit modal is loaded into.
	pub fn modal_container(mut self, id: impl Into<String>) -> Self {
		self.modal_container_id = id.into();
		self
	}

	pub fn delete_url(mut self, url: impl Into<String>) -> Self {
		self.delete_url = Some(url.into());
		self
	}

	pub fn delete_label(mut self, label: impl Into<String>) -> Self {
		self.delete_label = label.into();
		self
	}

	/// Id of the element the delete response replaces.
	pub fn delete_target(mut self, id: impl Into<String>) -> Self {
		self.delete_target = Some(id.into());
		self
	}

	pub fn delete_confirm(mut self, message: impl Into<String>) -> Self {
		self.delete_confirm = Some(message.into());
		self
	}

	pub fn module_id(&self) -> &DomId {
		&self.module_id
	}

	/// `editable-<module id>`
	pub fn wrapper_id(&self) -> String {
		format!("editable-{}", self.module_id)
	}

	fn with_mode(&self, url: &str) -> Result<String> {
		let url = validate_url(url)?;
		Ok(match self.edit_mode {
			Some(mode) => {
				let separator = if url.contains('?') { '&' } else { '?' };
				format!("{url}{separator}editMode={mode}")
			}
			None => url,
		})
	}

	fn edit_button(&self) -> Result<Option<Node>> {
		let Some(url) = self.edit_url.as_deref().filter(|u| !u.is_empty()) else {
			return Ok(None);
		};
		if !self.can_edit {
			return Ok(None);
		}
		let target = DomId::new(self.modal_container_id.clone())?;
		Button::new(self.edit_label.clone())
			.variant(Variant::Link)
			.class("module-edit-btn")
			.attr("hx-get", self.with_mode(url)?)
			.attr("hx-target", target.selector())
			.attr("hx-swap", "innerHTML")
			.attr("title", "Edit")
			.to_node()
			.map(Some)
	}

	fn delete_button(&self) -> Result<Option<Node>> {
		let Some(url) = self.delete_url.as_deref().filter(|u| !u.is_empty()) else {
			return Ok(None);
		};
		if !self.can_delete {
			return Ok(None);
		}
		let target = match &self.delete_target {
			Some(id) => DomId::new(id.clone())?,
			None => DomId::new(self.wrapper_id())?,
		};
		let mut button = Button::new(self.delete_label.clone())
			.variant(Variant::Link)
			.class("module-delete-btn")
			.attr("hx-delete", self.with_mode(url)?)
			.attr("hx-target", target.selector())
			.attr("hx-swap", "outerHTML");
		if let Some(confirm) = self.delete_confirm.as_deref().filter(|c| !c.is_empty()) {
			button = button.attr("hx-confirm", confirm.to_string());
		}
		button.attr("title", "Delete").to_node().map(Some)
	}
}

impl Component for EditableModule {
	fn name(&self) -> &'static str {
		"EditableModule"
	}

	fn to_node(&self) -> Result<Node> {
		div()
			.class("editable-module-wrapper")
			.id(self.wrapper_id())
			.child(self.edit_button()?)
			.child(self.delete_button()?)
			.child(self.content.clone())
			.build()
	}
}

/// Modules that expose their DOM id.
pub trait HasModuleId {
	fn module_id(&self) -> &DomId;
}

impl HasModuleId for crate::modules::ContentModule {
	fn module_id(&self) -> &DomId {
		self.id()
	}
}

impl HasModuleId for crate::modules::SimpleListModule {
	fn module_id(&self) -> &DomId {
		self.id()
	}
}

impl HasModuleId for crate::module::Module {
	fn module_id(&self) -> &DomId {
		self.id()
	}
}
