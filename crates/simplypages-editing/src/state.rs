//! Per-module edit state machine
//!
//! ```text
//! View ──request──▶ EditRequested ──submit──▶ EditSubmitted ──complete──▶ View
//!                                                          └──complete──▶ Absent (owner delete)
//! ```
//!
//! `Absent` is terminal for a key: the entity is gone from the store, and a
//! later entity with the same id starts over in `View`.
//!
//! What a submission does is decided in one place, [`decide`], from the
//! operation and the edit mode. Nested entities use the same table under a
//! scoped key `parent/child`.

use std::fmt;

use indexmap::IndexMap;
use parking_lot::Mutex;
use simplypages_components::EditMode;
use simplypages_core::DomId;


/// Lifecycle of one module or nested entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleState {
	/// Rendered with its edit affordance.
	#[default]
	View,
	/// The edit form is open; nothing changed yet.
	EditRequested,
	/// A mutation is being processed.
	EditSubmitted,
	/// Deleted by an owner.
	Absent,
}

/// The kind of mutation submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOperation {
	Update,
	Delete,
}

/// Effect of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
	/// Mutate stored content now.
	Apply,
	/// Queue for review; stored content is untouched.
	Enqueue,
	/// Remove the entity.
	Remove,
}

/// The single decision point for every submission.
pub fn decide(op: EditOperation, mode: EditMode) -> Decision {
	match (op, mode) {
		(_, EditMode::UserEdit) => Decision::Enqueue,
		(EditOperation::Update, EditMode::OwnerEdit) => Decision::Apply,
		(EditOperation::Delete, EditMode::OwnerEdit) => Decision::Remove,
	}
}

/// Identity of a tracked entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey(String);

impl StateKey {
	pub fn module(module_id: &DomId) -> Self {
		Self(module_id.to_string())
	}

	pub fn child(parent_id: &DomId, child_id: &DomId) -> Self {
		Self(format!("{parent_id}/{child_id}"))
	}

	pub fn scoped(module_id: &DomId, child_id: Option<&DomId>) -> Self {
		match child_id {
			Some(child) => Self::child(module_id, child),
			None => Self::module(module_id),
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for StateKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Tracks in-flight [`ModuleState`]s per key.
///
/// Only `EditRequested` and `EditSubmitted` are stored. A settled key is
/// forgotten, so the table holds one entry per open form at most. `Absent`
/// is reported by [`complete`](Self::complete) but not stored; whether an
/// entity still exists is the store's answer.
#[derive(Debug, Default)]
pub struct EditStateMachine {
	states: Mutex<IndexMap<StateKey, ModuleState>>,
}

impl EditStateMachine {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stored state, or `View` for a settled key.
	pub fn state(&self, key: &StateKey) -> ModuleState {
		self.states.lock().get(key).copied().unwrap_or_default()
	}

	/// Number of keys with an open form or a submission in flight.
	pub fn tracked(&self) -> usize {
		self.states.lock().len()
	}

	/// The edit form was rendered.
	pub fn request_edit(&self, key: &StateKey) {
		let previous = self.states.lock().insert(key.clone(), ModuleState::EditRequested);
		tracing::trace!(key = %key, from = ?previous.unwrap_or_default(), "edit requested");
	}

	/// Records a submission and decides its effect.
	///
	/// Submitting without a prior request (a direct POST) is allowed.
	#[tracing::instrument(level = "debug", skip(self, key), fields(key = %key))]
	pub fn submit(&self, key: &StateKey, op: EditOperation, mode: EditMode) -> Decision {
		let previous = self.states.lock().insert(key.clone(), ModuleState::EditSubmitted);
		match previous {
			Some(ModuleState::EditSubmitted) => {
				tracing::debug!("submission while another is in flight");
			}
			Some(ModuleState::EditRequested) => {}
			_ => tracing::debug!("direct submission without edit request"),
		}
		let decision = decide(op, mode);
		tracing::debug!(?decision, "submission decided");
		decision
	}

	/// Settles a submission after its decision was carried out and returns
	/// the state it settled in. A removal also forgets the entity's nested
	/// keys.
	pub fn complete(&self, key: &StateKey, decision: Decision) -> ModuleState {
		let mut states = self.states.lock();
		states.shift_remove(key);
		match decision {
			Decision::Apply | Decision::Enqueue => ModuleState::View,
			Decision::Remove => {
				let nested = format!("{key}/");
				states.retain(|tracked, _| !tracked.as_str().starts_with(&nested));
				ModuleState::Absent
			}
		}
	}

	/// A submission failed or was refused; the form stays open.
	pub fn abort(&self, key: &StateKey) {
		let mut states = self.states.lock();
		if states.get(key) == Some(&ModuleState::EditSubmitted) {
			states.insert(key.clone(), ModuleState::EditRequested);
		}
	}

	/// The form was closed or the entity is new.
	pub fn reset(&self, key: &StateKey) {
		self.states.lock().shift_remove(key);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn key(value: &str) -> StateKey {
		StateKey::module(&DomId::new(value).unwrap())
	}

	#[rstest]
	#[case(EditOperation::Update, EditMode::OwnerEdit, Decision::Apply)]
	#[case(EditOperation::Delete, EditMode::OwnerEdit, Decision::Remove)]
	#[case(EditOperation::Update, EditMode::UserEdit, Decision::Enqueue)]
	#[case(EditOperation::Delete, EditMode::UserEdit, Decision::Enqueue)]
	fn test_decision_table(
		#[case] op: EditOperation,
		#[case] mode: EditMode,
		#[case] expected: Decision,
	) {
		assert_eq!(decide(op, mode), expected);
	}

	#[test]
	fn test_update_cycle() {
		let machine = EditStateMachine::new();
		let k = key("module-1");
		assert_eq!(machine.state(&k), ModuleState::View);
		machine.request_edit(&k);
		assert_eq!(machine.state(&k), ModuleState::EditRequested);
		let decision = machine.submit(&k, EditOperation::Update, EditMode::OwnerEdit);
		assert_eq!(machine.state(&k), ModuleState::EditSubmitted);
		assert_eq!(machine.complete(&k, decision), ModuleState::View);
		assert_eq!(machine.state(&k), ModuleState::View);
		assert_eq!(machine.tracked(), 0);
	}

	#[test]
	fn test_owner_delete_settles_absent() {
		let machine = EditStateMachine::new();
		let k = key("module-1");
		let decision = machine.submit(&k, EditOperation::Delete, EditMode::OwnerEdit);
		assert_eq!(decision, Decision::Remove);
		assert_eq!(machine.complete(&k, decision), ModuleState::Absent);
		assert_eq!(machine.tracked(), 0);
		// Deleting again is still accepted.
		assert_eq!(
			machine.submit(&k, EditOperation::Delete, EditMode::OwnerEdit),
			Decision::Remove
		);
	}

	#[test]
	fn test_user_delete_keeps_view() {
		let machine = EditStateMachine::new();
		let k = key("module-1");
		let decision = machine.submit(&k, EditOperation::Delete, EditMode::UserEdit);
		assert_eq!(machine.complete(&k, decision), ModuleState::View);
	}

	#[test]
	fn test_abort_reopens_form() {
		let machine = EditStateMachine::new();
		let k = key("module-1");
		machine.request_edit(&k);
		machine.submit(&k, EditOperation::Update, EditMode::OwnerEdit);
		machine.abort(&k);
		assert_eq!(machine.state(&k), ModuleState::EditRequested);
		machine.reset(&k);
		assert_eq!(machine.tracked(), 0);
	}

	#[test]
	fn test_child_keys_are_scoped() {
		let parent = DomId::new("module-9").unwrap();
		let child = DomId::new("item-0").unwrap();
		let machine = EditStateMachine::new();
		let child_key = StateKey::child(&parent, &child);
		assert_eq!(child_key.as_str(), "module-9/item-0");

		machine.request_edit(&child_key);
		assert_eq!(machine.state(&StateKey::module(&parent)), ModuleState::View);
		let decision = machine.submit(&child_key, EditOperation::Delete, EditMode::OwnerEdit);
		assert_eq!(machine.complete(&child_key, decision), ModuleState::Absent);
		assert_eq!(machine.state(&child_key), ModuleState::View);
	}

	#[test]
	fn test_module_removal_forgets_open_child_forms() {
		let machine = EditStateMachine::new();
		let parent = DomId::new("module-9").unwrap();
		let other = DomId::new("module-90").unwrap();
		let item = DomId::new("item-0").unwrap();
		machine.request_edit(&StateKey::child(&parent, &item));
		machine.request_edit(&StateKey::child(&other, &item));
		let module = StateKey::module(&parent);
		let decision = machine.submit(&module, EditOperation::Delete, EditMode::OwnerEdit);
		machine.complete(&module, decision);
		assert_eq!(machine.tracked(), 1);
		assert_eq!(
			machine.state(&StateKey::child(&other, &item)),
			ModuleState::EditRequested
		);
	}
}
