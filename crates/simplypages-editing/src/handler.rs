//! Edit handlers
//!
//! [`EditHandler`] and [`ChildEditHandler`] are the capability interfaces the
//! request layer talks to. [`StoreEditHandler`] implements both over a
//! [`ModuleStore`], routing every submission through the
//! [`EditStateMachine`] and, for user-mode edits, the [`ApprovalQueue`].

use std::sync::Arc;

use simplypages_components::{Alert, Button, Component, EditMode, Modal, TextInput, Variant};
use simplypages_components::html::{div, p, strong};
use simplypages_components::text_field;
use simplypages_conf::EditingSettings;
use simplypages_core::{DomId, Node};
use uuid::Uuid;

use crate::approval::{ApprovalQueue, PendingChange, PendingEdit};
use crate::auth::{
	AuthorizationChecker, CREATE_DENIED, DELETE_DENIED, EDIT_DENIED, RoleAuthorizer,
	notice_modal, unauthorized_modal,
};
use crate::editable::{CONTROL_FIELDS, Fields, ValidationOutcome};
use crate::error::{EditError, Result};
use crate::modal::{EditModalBuilder, SAVE_INCLUDE, child_form_modal};
use crate::outcome::EditOutcome;
use crate::state::{Decision, EditOperation, EditStateMachine, ModuleState, StateKey};
use crate::store::{ModuleStore, StoredModule};

pub const MODULE_NOT_FOUND: &str = "Module not found";
pub const ITEM_NOT_FOUND: &str = "Item not found";
pub const PENDING_NOT_FOUND: &str = "Pending edit not found";
pub const NO_CHILDREN: &str = "This module has no editable items";
pub const SUBMITTED_FOR_APPROVAL: &str = "Your changes have been submitted for approval.";
pub const NO_PENDING_EDITS: &str = "No pending edits.";

/// Who is submitting and in which mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditRequest {
	pub user: Option<String>,
	pub mode: EditMode,
}

impl EditRequest {
	pub fn new(user: Option<String>, mode: EditMode) -> Self {
		Self { user, mode }
	}

	pub fn owner() -> Self {
		Self::default()
	}

	pub fn user(&self) -> Option<&str> {
		self.user.as_deref()
	}
}

/// Edits of a module's own properties.
pub trait EditHandler {
	/// The edit modal for `module_id`.
	fn render_edit_form(&self, module_id: &DomId, request: &EditRequest) -> Result<Node>;

	fn handle_update(
		&self,
		module_id: &DomId,
		fields: &Fields,
		request: &EditRequest,
	) -> Result<EditOutcome>;

	fn handle_delete(&self, module_id: &DomId, request: &EditRequest) -> Result<EditOutcome>;
}

/// Edits of entities nested in a module, addressed as `parent/child`.
pub trait ChildEditHandler {
	fn render_add_child_form(&self, parent_id: &DomId, request: &EditRequest) -> Result<Node>;

	fn render_edit_child_form(
		&self,
		parent_id: &DomId,
		child_id: &DomId,
		request: &EditRequest,
	) -> Result<Node>;

	fn handle_add_child(
		&self,
		parent_id: &DomId,
		fields: &Fields,
		request: &EditRequest,
	) -> Result<EditOutcome>;

	fn handle_update_child(
		&self,
		parent_id: &DomId,
		child_id: &DomId,
		fields: &Fields,
		request: &EditRequest,
	) -> Result<EditOutcome>;

	fn handle_delete_child(
		&self,
		parent_id: &DomId,
		child_id: &DomId,
		request: &EditRequest,
	) -> Result<EditOutcome>;
}

fn error_modal(message: &str) -> Result<Node> {
	Ok(error_modal_node(message)?)
}

fn error_modal_node(message: &str) -> simplypages_core::Result<Node> {
	notice_modal("Error", Alert::danger(message))
}

fn rejected(node: simplypages_core::Result<Node>) -> Result<EditOutcome> {
	Ok(EditOutcome::Rejected(node?))
}

fn validation_modal(outcome: &ValidationOutcome) -> simplypages_core::Result<Node> {
	notice_modal("Validation Error", Alert::danger(outcome.message()))
}

/// Submitted fields without the protocol's control fields.
fn editable_fields(fields: &Fields) -> Fields {
	fields
		.iter()
		.filter(|(name, _)| !CONTROL_FIELDS.contains(&name.as_str()))
		.map(|(name, value)| (name.clone(), value.clone()))
		.collect()
}

fn check_item_text(fields: &Fields) -> ValidationOutcome {
	if fields.get("text").is_none_or(|t| t.trim().is_empty()) {
		ValidationOutcome::invalid("Item text cannot be empty")
	} else {
		ValidationOutcome::valid()
	}
}

/// [`EditHandler`] and [`ChildEditHandler`] over a [`ModuleStore`].
pub struct StoreEditHandler<S> {
	store: Arc<S>,
	settings: Arc<EditingSettings>,
	auth: Arc<dyn AuthorizationChecker>,
	queue: Arc<ApprovalQueue>,
	machine: Arc<EditStateMachine>,
}

impl<S: ModuleStore> StoreEditHandler<S> {
	/// Validates `settings` and uses a [`RoleAuthorizer`] without owners.
	pub fn new(store: Arc<S>, settings: EditingSettings) -> Result<Self> {
		settings.validate()?;
		Ok(Self {
			store,
			settings: Arc::new(settings),
			auth: Arc::new(RoleAuthorizer::new()),
			queue: Arc::new(ApprovalQueue::new()),
			machine: Arc::new(EditStateMachine::new()),
		})
	}

	pub fn with_authorizer(mut self, auth: Arc<dyn AuthorizationChecker>) -> Self {
		self.auth = auth;
		self
	}

	pub fn with_queue(mut self, queue: Arc<ApprovalQueue>) -> Self {
		self.queue = queue;
		self
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn settings(&self) -> &EditingSettings {
		&self.settings
	}

	pub fn queue(&self) -> &ApprovalQueue {
		&self.queue
	}

	pub fn state_machine(&self) -> &EditStateMachine {
		&self.machine
	}

	/// The mode a request is granted.
	///
	/// The authorizer's mode for `user`, or the module default for an
	/// anonymous request, is the most the request gets. An explicit mode may
	/// lower owner to user but never raise user to owner.
	pub fn resolve_mode(
		&self,
		module_id: &DomId,
		explicit: Option<EditMode>,
		user: Option<&str>,
	) -> EditMode {
		let granted = match user {
			Some(user) => self.auth.edit_mode(user, module_id.as_str()),
			None => self
				.store
				.get(module_id.as_str())
				.map(|m| m.edit_mode())
				.unwrap_or_default(),
		};
		match explicit {
			Some(EditMode::UserEdit) => EditMode::UserEdit,
			Some(EditMode::OwnerEdit) if !granted.is_owner() => {
				tracing::warn!(user = ?user, module_id = %module_id, "owner mode not granted");
				granted
			}
			_ => granted,
		}
	}

	/// Where `module_id` (or its child) stands. `Absent` once the store no
	/// longer holds it.
	pub fn state(&self, module_id: &DomId, child_id: Option<&DomId>) -> ModuleState {
		let Some(module) = self.store.get(module_id.as_str()) else {
			return ModuleState::Absent;
		};
		if let Some(child) = child_id {
			let exists = module
				.content()
				.as_list()
				.is_some_and(|list| list.find_item(child.as_str()).is_some());
			if !exists {
				return ModuleState::Absent;
			}
		}
		self.machine.state(&StateKey::scoped(module_id, child_id))
	}

	fn route(&self, path: &str) -> String {
		self.settings.route(path)
	}

	/// `?editMode=..&user=..` when the request differs from the module's
	/// defaults, so follow-up GET and DELETE requests keep the same context.
	fn control_query(&self, module: &StoredModule, request: &EditRequest) -> Result<String> {
		if request.user.is_none() && request.mode == module.edit_mode() {
			return Ok(String::new());
		}
		let mut pairs = vec![("editMode", request.mode.as_str())];
		if let Some(user) = request.user() {
			pairs.push(("user", user));
		}
		serde_urlencoded::to_string(&pairs)
			.map(|query| format!("?{query}"))
			.map_err(|err| EditError::BadRequest(err.to_string()))
	}

	/// Hidden inputs carrying the request context into posted forms.
	fn control_inputs(request: &EditRequest) -> simplypages_core::Result<Node> {
		let mut inputs = vec![TextInput::hidden("editMode", request.mode.as_str()).to_node()?];
		if let Some(user) = request.user() {
			inputs.push(TextInput::hidden("user", user.to_string()).to_node()?);
		}
		Ok(Node::fragment(inputs))
	}

	fn list_parent(&self, parent_id: &DomId) -> std::result::Result<StoredModule, &'static str> {
		let module = self
			.store
			.get(parent_id.as_str())
			.ok_or(MODULE_NOT_FOUND)?;
		if module.content().as_list().is_none() {
			return Err(NO_CHILDREN);
		}
		Ok(module)
	}

	/// The notice for a change whose target disappeared before it applied.
	fn vanished(&self, module_id: &DomId) -> Result<EditOutcome> {
		if self.store.get(module_id.as_str()).is_some() {
			rejected(notice_modal("Error", Alert::warning(ITEM_NOT_FOUND)))
		} else {
			rejected(error_modal_node(MODULE_NOT_FOUND))
		}
	}

	fn current(&self, module_id: &DomId) -> Result<Node> {
		Ok(match self.store.get(module_id.as_str()) {
			Some(module) => module.wrapper(&self.settings)?,
			None => Node::empty(),
		})
	}

	/// Runs a validated change through the state machine.
	fn submit(
		&self,
		module_id: &DomId,
		child_id: Option<&DomId>,
		op: EditOperation,
		change: PendingChange,
		request: &EditRequest,
	) -> Result<EditOutcome> {
		let key = StateKey::scoped(module_id, child_id);
		let decision = self.machine.submit(&key, op, request.mode);

		if decision == Decision::Enqueue {
			self.queue.submit(
				module_id.clone(),
				child_id.cloned(),
				change,
				request.user.clone(),
			);
			self.machine.complete(&key, decision);
			return Ok(EditOutcome::PendingApproval {
				content: self.current(module_id)?,
				notice: Alert::info(SUBMITTED_FOR_APPROVAL).to_node()?,
			});
		}

		let applied = match change.apply(&*self.store, module_id, child_id, &self.settings) {
			Ok(applied) => applied,
			Err(EditError::NotFound(target)) => {
				tracing::debug!(%target, "target removed before the change applied");
				self.machine.abort(&key);
				return self.vanished(module_id);
			}
			Err(err) => {
				self.machine.abort(&key);
				return Err(err);
			}
		};
		self.machine.complete(&key, decision);
		if let Some(child) = &applied.created_child {
			tracing::debug!(child_id = %child, "child created");
		}
		let node = match &applied.module {
			Some(module) => module.wrapper(&self.settings)?,
			None => Node::empty(),
		};
		Ok(EditOutcome::Applied(node))
	}

	/// Applies a queued change. Only owners may approve.
	#[tracing::instrument(skip_all, fields(edit_id = %edit_id))]
	pub fn approve(&self, edit_id: &Uuid, request: &EditRequest) -> Result<EditOutcome> {
		let Some(edit) = self.queue.get(edit_id) else {
			return rejected(notice_modal("Error", Alert::warning(PENDING_NOT_FOUND)));
		};
		if !self.is_owner(request, &edit) {
			tracing::warn!(user = ?request.user, "approval denied");
			return rejected(unauthorized_modal(EDIT_DENIED));
		}
		let applied = match self.queue.approve(edit_id, &*self.store, &self.settings) {
			Ok(Some(applied)) => applied,
			Ok(None) => return rejected(notice_modal("Error", Alert::warning(PENDING_NOT_FOUND))),
			Err(EditError::NotFound(target)) => {
				tracing::debug!(%target, "approved edit no longer applies");
				return self.vanished(&edit.module_id);
			}
			Err(err) => return Err(err),
		};
		let key = StateKey::scoped(&edit.module_id, edit.child_id.as_ref());
		let decision = if edit.change.is_removal() {
			Decision::Remove
		} else {
			Decision::Apply
		};
		self.machine.complete(&key, decision);
		let node = match &applied.module {
			Some(module) => module.wrapper(&self.settings)?,
			None => Node::empty(),
		};
		Ok(EditOutcome::Applied(node))
	}

	/// Drops a queued change. Only owners may reject.
	#[tracing::instrument(skip_all, fields(edit_id = %edit_id))]
	pub fn reject(&self, edit_id: &Uuid, request: &EditRequest) -> Result<EditOutcome> {
		let Some(edit) = self.queue.get(edit_id) else {
			return rejected(notice_modal("Error", Alert::warning(PENDING_NOT_FOUND)));
		};
		if !self.is_owner(request, &edit) {
			tracing::warn!(user = ?request.user, "rejection denied");
			return rejected(unauthorized_modal(EDIT_DENIED));
		}
		self.queue.reject(edit_id);
		Ok(EditOutcome::Applied(self.current(&edit.module_id)?))
	}

	fn is_owner(&self, request: &EditRequest, edit: &PendingEdit) -> bool {
		request
			.user()
			.is_some_and(|user| self.auth.edit_mode(user, edit.module_id.as_str()).is_owner())
	}

	/// The "Pending Edits" modal.
	pub fn render_pending(&self, request: &EditRequest) -> Result<Node> {
		let pending = self.queue.pending();
		let body = if pending.is_empty() {
			Alert::info(NO_PENDING_EDITS).to_node()?
		} else {
			let mut cards = Vec::with_capacity(pending.len() + 1);
			if let Some(user) = request.user() {
				cards.push(TextInput::hidden("user", user.to_string()).to_node()?);
			}
			for edit in &pending {
				cards.push(self.pending_card(edit)?);
			}
			Node::fragment(cards)
		};
		let close = Button::new("Close")
			.variant(Variant::Secondary)
			.attr("data-modal-id", self.settings.modal_container_id.clone())
			.attr(
				"onclick",
				"document.getElementById(this.dataset.modalId).innerHTML = ''",
			)
			.to_node()?;
		Ok(Modal::new()
			.title("Pending Edits")
			.body(body)
			.footer(close)
			.to_node()?)
	}

	fn pending_card(&self, edit: &PendingEdit) -> simplypages_core::Result<Node> {
		let submitted = match &edit.submitted_by {
			Some(user) => format!(
				"Submitted by {user} at {}",
				edit.submitted_at.format("%Y-%m-%d %H:%M UTC")
			),
			None => format!("Submitted at {}", edit.submitted_at.format("%Y-%m-%d %H:%M UTC")),
		};
		let actions = div()
			.class("d-flex gap-2")
			.try_child(
				Button::new("Approve")
					.variant(Variant::Success)
					.small()
					.attr("hx-post", self.route(&format!("/pending/{}/approve", edit.id)))
					.attr("hx-swap", "none")
					.attr("hx-include", SAVE_INCLUDE)
					.to_node(),
			)
			.try_child(
				Button::new("Reject")
					.variant(Variant::Danger)
					.small()
					.attr("hx-post", self.route(&format!("/pending/{}/reject", edit.id)))
					.attr("hx-swap", "none")
					.attr("hx-include", SAVE_INCLUDE)
					.to_node(),
			)
			.build()?;
		div()
			.class("card mb-2")
			.try_child(
				div()
					.class("card-body")
					.try_child(
						p().try_child(strong().text(format!("Module: {}", edit.target())).build())
							.build(),
					)
					.try_child(
						p().class("text-muted small")
							.text(edit.change.describe())
							.build(),
					)
					.try_child(p().class("small").text(submitted).build())
					.child(actions)
					.build(),
			)
			.build()
	}
}

impl<S: ModuleStore> EditHandler for StoreEditHandler<S> {
	#[tracing::instrument(skip_all, fields(module_id = %module_id, edit_mode = %request.mode))]
	fn render_edit_form(&self, module_id: &DomId, request: &EditRequest) -> Result<Node> {
		let Some(module) = self.store.get(module_id.as_str()) else {
			return error_modal(MODULE_NOT_FOUND);
		};
		if !self.auth.can_edit(request.user(), module_id.as_str()) {
			tracing::warn!(user = ?request.user, "edit form denied");
			return Ok(unauthorized_modal(EDIT_DENIED)?);
		}
		self.machine.request_edit(&StateKey::module(module_id));

		let query = self.control_query(&module, request)?;
		let view = Node::fragment([
			module.edit_view(&self.settings)?,
			Self::control_inputs(request)?,
		]);
		let mut builder = EditModalBuilder::new()
			.edit_view(view)
			.save_url(self.route(&format!("/modules/{module_id}/update")))
			.page_container(self.settings.page_container_id.clone())
			.modal_container(self.settings.modal_container_id.clone())
			.edit_mode(request.mode)
			.children(module.editable_children());
		if self.auth.can_delete(request.user(), module_id.as_str()) {
			builder =
				builder.delete_url(self.route(&format!("/modules/{module_id}/delete{query}")));
		}
		if module.content().as_list().is_some() {
			builder = builder
				.child_edit_url(self.route(&format!("/edit-child/{module_id}/{{id}}{query}")))
				.child_delete_url(self.route(&format!("/delete-child/{module_id}/{{id}}{query}")))
				.add_child_url(self.route(&format!("/add-child/{module_id}{query}")));
		}
		Ok(builder.build()?.to_node()?)
	}

	#[tracing::instrument(skip_all, fields(module_id = %module_id, edit_mode = %request.mode))]
	fn handle_update(
		&self,
		module_id: &DomId,
		fields: &Fields,
		request: &EditRequest,
	) -> Result<EditOutcome> {
		let Some(module) = self.store.get(module_id.as_str()) else {
			return rejected(error_modal_node(MODULE_NOT_FOUND));
		};
		if !self.auth.can_edit(request.user(), module_id.as_str()) {
			tracing::warn!(user = ?request.user, "update denied");
			return rejected(unauthorized_modal(EDIT_DENIED));
		}
		let key = StateKey::module(module_id);
		let fields = editable_fields(fields);
		let validation = module.validate(&fields, &self.settings);
		if !validation.is_valid() {
			tracing::debug!(errors = %validation.message(), "update failed validation");
			self.machine.abort(&key);
			return rejected(validation_modal(&validation));
		}
		self.submit(
			module_id,
			None,
			EditOperation::Update,
			PendingChange::Update(fields),
			request,
		)
	}

	#[tracing::instrument(skip_all, fields(module_id = %module_id, edit_mode = %request.mode))]
	fn handle_delete(&self, module_id: &DomId, request: &EditRequest) -> Result<EditOutcome> {
		if !self.auth.can_delete(request.user(), module_id.as_str()) {
			tracing::warn!(user = ?request.user, "delete denied");
			return rejected(unauthorized_modal(DELETE_DENIED));
		}
		if self.store.get(module_id.as_str()).is_none() {
			tracing::debug!("delete of absent module");
			return Ok(EditOutcome::Applied(Node::empty()));
		}
		self.submit(
			module_id,
			None,
			EditOperation::Delete,
			PendingChange::Delete,
			request,
		)
	}
}

impl<S: ModuleStore> ChildEditHandler for StoreEditHandler<S> {
	#[tracing::instrument(skip_all, fields(module_id = %parent_id))]
	fn render_add_child_form(&self, parent_id: &DomId, request: &EditRequest) -> Result<Node> {
		if let Err(message) = self.list_parent(parent_id) {
			return error_modal(message);
		}
		if !self.auth.can_create(request.user(), parent_id.as_str()) {
			return Ok(unauthorized_modal(CREATE_DENIED)?);
		}
		let form = Node::fragment([text_field("Item Text", "text", "")?, Self::control_inputs(request)?]);
		Ok(child_form_modal(
			"Add New Item",
			form,
			&self.route(&format!("/add-child/{parent_id}")),
			"Add Item",
			&self.settings.modal_container_id,
		)?)
	}

	#[tracing::instrument(skip_all, fields(module_id = %parent_id, child_id = %child_id))]
	fn render_edit_child_form(
		&self,
		parent_id: &DomId,
		child_id: &DomId,
		request: &EditRequest,
	) -> Result<Node> {
		let parent = match self.list_parent(parent_id) {
			Ok(parent) => parent,
			Err(message) => return error_modal(message),
		};
		if !self.auth.can_edit(request.user(), parent_id.as_str()) {
			return Ok(unauthorized_modal(EDIT_DENIED)?);
		}
		let Some(item) = parent
			.content()
			.as_list()
			.and_then(|list| list.find_item(child_id.as_str()))
		else {
			return Ok(notice_modal("Error", Alert::warning(ITEM_NOT_FOUND))?);
		};
		self.machine.request_edit(&StateKey::child(parent_id, child_id));

		let form = Node::fragment([
			text_field("Item Text", "text", item.text())?,
			Self::control_inputs(request)?,
		]);
		Ok(child_form_modal(
			"Edit Item",
			form,
			&self.route(&format!("/save-child/{parent_id}/{child_id}")),
			"Save Changes",
			&self.settings.modal_container_id,
		)?)
	}

	#[tracing::instrument(skip_all, fields(module_id = %parent_id, edit_mode = %request.mode))]
	fn handle_add_child(
		&self,
		parent_id: &DomId,
		fields: &Fields,
		request: &EditRequest,
	) -> Result<EditOutcome> {
		if let Err(message) = self.list_parent(parent_id) {
			return rejected(error_modal_node(message));
		}
		if !self.auth.can_create(request.user(), parent_id.as_str()) {
			tracing::warn!(user = ?request.user, "add denied");
			return rejected(unauthorized_modal(CREATE_DENIED));
		}
		let fields = editable_fields(fields);
		let validation = check_item_text(&fields);
		if !validation.is_valid() {
			return rejected(validation_modal(&validation));
		}
		self.submit(
			parent_id,
			None,
			EditOperation::Update,
			PendingChange::AddChild(fields),
			request,
		)
	}

	#[tracing::instrument(
		skip_all,
		fields(module_id = %parent_id, child_id = %child_id, edit_mode = %request.mode)
	)]
	fn handle_update_child(
		&self,
		parent_id: &DomId,
		child_id: &DomId,
		fields: &Fields,
		request: &EditRequest,
	) -> Result<EditOutcome> {
		let parent = match self.list_parent(parent_id) {
			Ok(parent) => parent,
			Err(message) => return rejected(error_modal_node(message)),
		};
		if !self.auth.can_edit(request.user(), parent_id.as_str()) {
			tracing::warn!(user = ?request.user, "item update denied");
			return rejected(unauthorized_modal(EDIT_DENIED));
		}
		let exists = parent
			.content()
			.as_list()
			.is_some_and(|list| list.find_item(child_id.as_str()).is_some());
		if !exists {
			return rejected(notice_modal("Error", Alert::warning(ITEM_NOT_FOUND)));
		}
		let key = StateKey::child(parent_id, child_id);
		let fields = editable_fields(fields);
		let validation = check_item_text(&fields);
		if !validation.is_valid() {
			self.machine.abort(&key);
			return rejected(validation_modal(&validation));
		}
		self.submit(
			parent_id,
			Some(child_id),
			EditOperation::Update,
			PendingChange::UpdateChild(fields),
			request,
		)
	}

	#[tracing::instrument(
		skip_all,
		fields(module_id = %parent_id, child_id = %child_id, edit_mode = %request.mode)
	)]
	fn handle_delete_child(
		&self,
		parent_id: &DomId,
		child_id: &DomId,
		request: &EditRequest,
	) -> Result<EditOutcome> {
		if let Err(message) = self.list_parent(parent_id) {
			return rejected(error_modal_node(message));
		}
		if !self.auth.can_edit(request.user(), parent_id.as_str()) {
			tracing::warn!(user = ?request.user, "item delete denied");
			return rejected(unauthorized_modal(EDIT_DENIED));
		}
		self.submit(
			parent_id,
			Some(child_id),
			EditOperation::Delete,
			PendingChange::DeleteChild,
			request,
		)
	}
}
