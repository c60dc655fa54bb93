//! The edit modal
//!
//! Layout of the generated modal body:
//!
//! ```text
//! [Alert "Edits will be staged for approval."]   (user mode only)
//! div.edit-properties-section                     the module's form fields
//! div.edit-children-section                       (when children or an add url exist)
//!     h4 "Content Items"
//!     div.list-group > div.list-group-item*       label, summary, Edit / Delete
//!     button "+ Add Item"
//! ```
//!
//! The footer holds Delete (optional), Cancel and "Save Changes". Save posts
//! every input of the modal body with `hx-swap="none"`; the response's
//! out-of-band fragments close the modal and refresh the page.

use simplypages_components::html::div;
use simplypages_components::{Alert, Button, Component, EditMode, Heading, Modal, Variant};
use simplypages_core::security::validate_url;
use simplypages_core::{DomId, Node, Result, ValidationError};

use crate::editable::EditableChild;

/// Sent by the save button.
pub const SAVE_INCLUDE: &str = ".modal-body input, .modal-body textarea, .modal-body select";

pub const STAGED_NOTICE: &str = "Edits will be staged for approval.";

const MODULE_DELETE_CONFIRM: &str =
	"Are you sure you want to delete this module? This cannot be undone.";
const CHILD_DELETE_CONFIRM: &str = "Delete this item?";

/// JavaScript that empties the element named by `data-modal-id`.
fn clear_script() -> &'static str {
	"document.getElementById(this.dataset.modalId).innerHTML = ''"
}

/// Builds the modal returned for `GET /edit/{id}`.
///
/// # Examples
///
/// ```
/// use simplypages_components::{Component, EditMode, text_field};
/// use simplypages_editing::EditModalBuilder;
///
/// let modal = EditModalBuilder::new()
/// 	.edit_view(text_field("Title", "title", "Intro").unwrap())
/// 	.save_url("/modules/module-1/update")
/// 	.edit_mode(EditMode::UserEdit)
/// 	.build()
/// 	.unwrap();
/// let html = modal.render().unwrap();
/// assert!(html.contains("Edits will be staged for approval."));
/// assert!(html.contains("hx-post=\"/modules/module-1/update\""));
/// ```
#[derive(Debug, Clone)]
pub struct EditModalBuilder {
	title: String,
	edit_view: Option<Node>,
	save_url: Option<String>,
	delete_url: Option<String>,
	page_container_id: String,
	modal_container_id: String,
	edit_mode: EditMode,
	children: Vec<EditableChild>,
	child_edit_url: Option<String>,
	child_delete_url: Option<String>,
	add_child_url: Option<String>,
}

impl Default for EditModalBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl EditModalBuilder {
	pub fn new() -> Self {
		Self {
			title: "Edit Module".to_string(),
			edit_view: None,
			save_url: None,
			delete_url: None,
			page_container_id: "page-content".to_string(),
			modal_container_id: "edit-modal-container".to_string(),
			edit_mode: EditMode::OwnerEdit,
			children: Vec::new(),
			child_edit_url: None,
			child_delete_url: None,
			add_child_url: None,
		}
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	/// The module's form fields. Required.
	pub fn edit_view(mut self, view: Node) -> Self {
		self.edit_view = Some(view);
		self
	}

	/// Target of "Save Changes". Required.
	pub fn save_url(mut self, url: impl Into<String>) -> Self {
		self.save_url = Some(url.into());
		self
	}

	/// Shows a Delete button in the footer.
	pub fn delete_url(mut self, url: impl Into<String>) -> Self {
		self.delete_url = Some(url.into());
		self
	}

	pub fn page_container(mut self, id: impl Into<String>) -> Self {
		self.page_container_id = id.into();
		self
	}

	pub fn modal_container(mut self, id: impl Into<String>) -> Self {
		self.modal_container_id = id.into();
		self
	}

	pub fn edit_mode(mut self, mode: EditMode) -> Self {
		self.edit_mode = mode;
		self
	}

	pub fn children(mut self, children: Vec<EditableChild>) -> Self {
		self.children = children;
		self
	}

	/// URL template for a child's Edit button; `{id}` is replaced by the
	/// child id.
	pub fn child_edit_url(mut self, template: impl Into<String>) -> Self {
		self.child_edit_url = Some(template.into());
		self
	}

	/// URL template for a child's Delete button.
	pub fn child_delete_url(mut self, template: impl Into<String>) -> Self {
		self.child_delete_url = Some(template.into());
		self
	}

	/// Shows "+ Add Item", loading the creation form into the modal container.
	pub fn add_child_url(mut self, url: impl Into<String>) -> Self {
		self.add_child_url = Some(url.into());
		self
	}

	pub fn build(self) -> Result<Modal> {
		let edit_view = self
			.edit_view
			.clone()
			.ok_or(ValidationError::MissingField("edit_view"))?;
		let save_url = validate_url(
			self.save_url
				.as_deref()
				.ok_or(ValidationError::MissingField("save_url"))?,
		)?;

		let mut body = Vec::new();
		if self.edit_mode == EditMode::UserEdit {
			body.push(Alert::info(STAGED_NOTICE).class("mb-3").to_node()?);
		}
		body.push(
			div()
				.class("edit-properties-section")
				.child(edit_view)
				.build()?,
		);
		if let Some(section) = self.children_section()? {
			body.push(section);
		}

		Ok(Modal::new()
			.title(self.title.clone())
			.body(Node::fragment(body))
			.footer(self.footer(&save_url)?)
			.close_on_backdrop(false))
	}

	fn child_url(template: Option<&str>, child_id: &str) -> Result<Option<String>> {
		let Some(template) = template else {
			return Ok(None);
		};
		// Child ids are interpolated into URLs, so they get the id grammar.
		let id = DomId::new(child_id)?;
		validate_url(&template.replace("{id}", id.as_str())).map(Some)
	}

	fn child_row(&self, child: &EditableChild) -> Result<Node> {
		let info = div()
			.try_child(div().class("fw-bold").text(child.label.clone()).build())
			.try_child(
				div()
					.class("text-muted small text-truncate")
					.max_width("200px")
					.text(child.summary.clone())
					.build(),
			)
			.build()?;

		let mut actions = div().class("btn-group btn-group-sm");
		if let Some(url) = Self::child_url(self.child_edit_url.as_deref(), &child.id)? {
			actions = actions.try_child(
				Button::new("Edit")
					.variant(Variant::Secondary)
					.attr("hx-get", url)
					.attr("hx-target", "#modal")
					.attr("hx-swap", "innerHTML")
					.to_node(),
			);
		}
		if let Some(url) = Self::child_url(self.child_delete_url.as_deref(), &child.id)? {
			actions = actions.try_child(
				Button::new("Delete")
					.variant(Variant::Danger)
					.attr("hx-delete", url)
					.attr("hx-confirm", CHILD_DELETE_CONFIRM)
					.attr("hx-target", "#modal")
					.attr("hx-swap", "innerHTML")
					.to_node(),
			);
		}

		div()
			.class("list-group-item d-flex justify-content-between align-items-center p-2")
			.child(info)
			.try_child(actions.build())
			.build()
	}

	fn children_section(&self) -> Result<Option<Node>> {
		if self.children.is_empty() && self.add_child_url.is_none() {
			return Ok(None);
		}
		let mut list = div().class("list-group");
		for child in &self.children {
			list = list.child(self.child_row(child)?);
		}

		let mut section = div()
			.class("edit-children-section mt-4")
			.try_child(Heading::h4("Content Items").class("mb-3").to_node())
			.try_child(list.build());

		if let Some(url) = &self.add_child_url {
			let target = DomId::new(self.modal_container_id.clone())?;
			section = section.try_child(
				Button::new("+ Add Item")
					.variant(Variant::Primary)
					.small()
					.class("mt-2")
					.attr("hx-get", validate_url(url)?)
					.attr("hx-target", target.selector())
					.attr("hx-swap", "innerHTML")
					.to_node(),
			);
		}
		section.build().map(Some)
	}

	fn footer(&self, save_url: &str) -> Result<Node> {
		let modal_container = DomId::new(self.modal_container_id.clone())?;
		let page_container = DomId::new(self.page_container_id.clone())?;

		let mut left = div();
		if let Some(url) = &self.delete_url {
			left = left.try_child(
				Button::new("Delete")
					.variant(Variant::Danger)
					.attr("hx-delete", validate_url(url)?)
					.attr("hx-confirm", MODULE_DELETE_CONFIRM)
					.attr("hx-target", page_container.selector())
					.attr("hx-swap", "none")
					.to_node(),
			);
		}

		let right = div()
			.class("d-flex gap-2")
			.try_child(
				Button::new("Cancel")
					.variant(Variant::Secondary)
					.attr("data-modal-id", modal_container.as_str().to_string())
					.attr("onclick", clear_script())
					.to_node(),
			)
			.try_child(
				Button::new("Save Changes")
					.variant(Variant::Primary)
					.attr("hx-post", save_url.to_string())
					.attr("hx-swap", "none")
					.attr("hx-include", SAVE_INCLUDE)
					.to_node(),
			);

		div()
			.class("d-flex justify-content-between w-100")
			.try_child(left.build())
			.try_child(right.build())
			.build()
	}
}

/// A form modal for a nested entity (add or edit), posting to `save_url`.
pub(crate) fn child_form_modal(
	title: &str,
	form: Node,
	save_url: &str,
	save_label: &str,
	modal_container_id: &str,
) -> Result<Node> {
	let modal_container = DomId::new(modal_container_id)?;
	let footer = div()
		.class("d-flex justify-content-end gap-2 w-100")
		.try_child(
			Button::new("Cancel")
				.variant(Variant::Secondary)
				.attr("data-modal-id", modal_container.as_str().to_string())
				.attr("onclick", clear_script())
				.to_node(),
		)
		.try_child(
			Button::new(save_label)
				.variant(Variant::Primary)
				.attr("hx-post", validate_url(save_url)?)
				.attr("hx-swap", "none")
				.attr("hx-include", SAVE_INCLUDE)
				.to_node(),
		)
		.build()?;
	Modal::new()
		.title(title)
		.body(form)
		.footer(footer)
		.close_on_backdrop(false)
		.to_node()
}
