//! Approval queue for user-mode edits
//!
//! Changes submitted under [`EditMode::UserEdit`](simplypages_components::EditMode)
//! do not touch stored content. They wait here until an owner approves them
//! (the change is applied through the store) or rejects them (the change is
//! dropped).

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::Mutex;
use simplypages_conf::EditingSettings;
use simplypages_core::DomId;
use uuid::Uuid;

use crate::editable::{CONTROL_FIELDS, Fields};
use crate::error::{EditError, Result};
use crate::store::{ModuleStore, StoredModule};

/// A change to a module or to one of its nested entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChange {
	Update(Fields),
	Delete,
	AddChild(Fields),
	UpdateChild(Fields),
	DeleteChild,
}

impl PendingChange {
	/// Whether the change removes something.
	pub fn is_removal(&self) -> bool {
		matches!(self, PendingChange::Delete | PendingChange::DeleteChild)
	}

	pub fn fields(&self) -> Option<&Fields> {
		match self {
			PendingChange::Update(fields)
			| PendingChange::AddChild(fields)
			| PendingChange::UpdateChild(fields) => Some(fields),
			PendingChange::Delete | PendingChange::DeleteChild => None,
		}
	}

	/// Human-readable summary, e.g. `Fields: title, content`.
	pub fn describe(&self) -> String {
		match self {
			PendingChange::Delete => "Delete module".to_string(),
			PendingChange::DeleteChild => "Delete item".to_string(),
			PendingChange::AddChild(fields) | PendingChange::UpdateChild(fields)
				if fields.contains_key("text") =>
			{
				let verb = if matches!(self, PendingChange::AddChild(_)) {
					"Add item"
				} else {
					"Edit item"
				};
				format!("{verb}: {}", fields.get("text").map(String::as_str).unwrap_or_default())
			}
			_ => {
				let names: Vec<&str> = self
					.fields()
					.into_iter()
					.flat_map(|f| f.keys())
					.map(String::as_str)
					.filter(|name| !CONTROL_FIELDS.contains(name))
					.collect();
				format!("Fields: {}", names.join(", "))
			}
		}
	}

	/// Applies the change through `store`.
	///
	/// The whole read-modify-write runs inside [`ModuleStore::update`].
	/// Removing something already absent succeeds without effect. Returns
	/// the module as it stands afterwards (`None` once it is removed) and the
	/// id of a newly created child.
	pub fn apply<S: ModuleStore + ?Sized>(
		&self,
		store: &S,
		module_id: &DomId,
		child_id: Option<&DomId>,
		settings: &EditingSettings,
	) -> Result<AppliedChange> {
		if matches!(self, PendingChange::Delete) {
			store.remove(module_id.as_str());
			return Ok(AppliedChange::default());
		}

		let mut created_child = None;
		let module = store
			.update(module_id.as_str(), &mut |module: &mut StoredModule| -> Result<()> {
				match self {
					PendingChange::Update(fields) => module.apply_edits(fields, settings),
					PendingChange::Delete => {}
					PendingChange::AddChild(fields) => {
						let text = fields.get("text").cloned().unwrap_or_default();
						created_child = Some(list_of(module)?.add_item(text));
					}
					PendingChange::UpdateChild(fields) => {
						let child = require_child(child_id)?;
						let text = fields.get("text").cloned().unwrap_or_default();
						if !list_of(module)?.update_item(child.as_str(), text) {
							return Err(EditError::NotFound(format!("item {child} in {module_id}")));
						}
					}
					PendingChange::DeleteChild => {
						let child = require_child(child_id)?;
						list_of(module)?.remove_item(child.as_str());
					}
				}
				Ok(())
			})?
			.ok_or_else(|| EditError::NotFound(format!("module {module_id}")))?;

		Ok(AppliedChange {
			module: Some(module),
			created_child,
		})
	}
}

fn list_of(module: &mut StoredModule) -> Result<&mut simplypages_components::SimpleListModule> {
	let id = module.id().clone();
	module
		.content_mut()
		.as_list_mut()
		.ok_or_else(|| EditError::BadRequest(format!("module {id} has no editable children")))
}

fn require_child(child_id: Option<&DomId>) -> Result<&DomId> {
	child_id.ok_or_else(|| EditError::BadRequest("missing child id".to_string()))
}

/// What [`PendingChange::apply`] left behind.
#[derive(Debug, Clone, Default)]
pub struct AppliedChange {
	pub module: Option<StoredModule>,
	pub created_child: Option<DomId>,
}

/// A queued change awaiting review.
#[derive(Debug, Clone)]
pub struct PendingEdit {
	pub id: Uuid,
	pub module_id: DomId,
	pub child_id: Option<DomId>,
	pub change: PendingChange,
	pub submitted_by: Option<String>,
	pub submitted_at: DateTime<Utc>,
}

impl PendingEdit {
	/// `module` or `module/child`.
	pub fn target(&self) -> String {
		match &self.child_id {
			Some(child) => format!("{}/{}", self.module_id, child),
			None => self.module_id.to_string(),
		}
	}
}

/// Queued changes in submission order.
#[derive(Debug, Default)]
pub struct ApprovalQueue {
	entries: Mutex<IndexMap<Uuid, PendingEdit>>,
}

impl ApprovalQueue {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues a change and returns its id.
	///
	/// A new update replaces an earlier queued update of the same target,
	/// so a user re-saving a form leaves one entry.
	pub fn submit(
		&self,
		module_id: DomId,
		child_id: Option<DomId>,
		change: PendingChange,
		submitted_by: Option<String>,
	) -> Uuid {
		let mut entries = self.entries.lock();
		if matches!(change, PendingChange::Update(_) | PendingChange::UpdateChild(_)) {
			entries.retain(|_, edit| {
				!(edit.module_id == module_id
					&& edit.child_id == child_id
					&& std::mem::discriminant(&edit.change) == std::mem::discriminant(&change))
			});
		}
		let edit = PendingEdit {
			id: Uuid::new_v4(),
			module_id,
			child_id,
			change,
			submitted_by,
			submitted_at: Utc::now(),
		};
		let id = edit.id;
		tracing::debug!(edit_id = %id, target = %edit.target(), "queued edit for approval");
		entries.insert(id, edit);
		id
	}

	pub fn pending(&self) -> Vec<PendingEdit> {
		self.entries.lock().values().cloned().collect()
	}

	pub fn get(&self, id: &Uuid) -> Option<PendingEdit> {
		self.entries.lock().get(id).cloned()
	}

	pub fn len(&self) -> usize {
		self.entries.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.lock().is_empty()
	}

	/// Applies a queued change, then removes it. Returns `None` if `id` is
	/// not queued. A change that fails to apply stays queued, so an owner
	/// can still reject it.
	pub fn approve<S: ModuleStore + ?Sized>(
		&self,
		id: &Uuid,
		store: &S,
		settings: &EditingSettings,
	) -> Result<Option<AppliedChange>> {
		let mut entries = self.entries.lock();
		let Some(edit) = entries.get(id) else {
			return Ok(None);
		};
		tracing::debug!(edit_id = %id, target = %edit.target(), "approving edit");
		let applied = edit
			.change
			.apply(store, &edit.module_id, edit.child_id.as_ref(), settings)?;
		entries.shift_remove(id);
		Ok(Some(applied))
	}

	/// Drops a queued change. Returns it, or `None` if `id` is not queued.
	pub fn reject(&self, id: &Uuid) -> Option<PendingEdit> {
		let edit = self.entries.lock().shift_remove(id);
		if let Some(edit) = &edit {
			tracing::debug!(edit_id = %id, target = %edit.target(), "rejected edit");
		}
		edit
	}
}
