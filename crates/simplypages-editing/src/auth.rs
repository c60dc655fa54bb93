//! Edit permissions
//!
//! [`AuthorizationChecker`] decides who may edit or delete a module and in
//! which mode their changes land. A denial is not an error: it renders as an
//! "Unauthorized" modal via [`unauthorized_modal`].

use indexmap::IndexSet;
use simplypages_components::{Alert, Component, EditMode, Modal};
use simplypages_core::{Node, Result};

pub const EDIT_DENIED: &str = "You do not have permission to edit this content";
pub const DELETE_DENIED: &str = "You do not have permission to delete this content";
pub const CREATE_DENIED: &str = "You do not have permission to create content";

/// Permission policy consulted before every edit operation.
pub trait AuthorizationChecker: Send + Sync {
	fn can_edit(&self, user: Option<&str>, module_id: &str) -> bool;

	fn can_delete(&self, user: Option<&str>, module_id: &str) -> bool;

	/// Adding a nested entity counts as editing its parent.
	fn can_create(&self, user: Option<&str>, parent_id: &str) -> bool {
		self.can_edit(user, parent_id)
	}

	/// Mode in which `user`'s changes to `module_id` are handled.
	fn edit_mode(&self, user: &str, module_id: &str) -> EditMode;
}

/// Owners edit and delete directly. Everyone else edits in
/// [`EditMode::UserEdit`] and cannot delete.
///
/// Modules can be restricted to owners or made read-only for all.
///
/// # Examples
///
/// ```
/// use simplypages_components::EditMode;
/// use simplypages_editing::{AuthorizationChecker, RoleAuthorizer};
///
/// let auth = RoleAuthorizer::new()
/// 	.owner("admin")
/// 	.owner_only("module-2")
/// 	.read_only("module-3");
///
/// assert_eq!(auth.edit_mode("admin", "module-1"), EditMode::OwnerEdit);
/// assert_eq!(auth.edit_mode("editor", "module-1"), EditMode::UserEdit);
/// assert!(!auth.can_edit(Some("editor"), "module-2"));
/// assert!(!auth.can_edit(Some("admin"), "module-3"));
/// assert!(!auth.can_delete(Some("editor"), "module-1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoleAuthorizer {
	owners: IndexSet<String>,
	owner_only: IndexSet<String>,
	read_only: IndexSet<String>,
}

impl RoleAuthorizer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn owner(mut self, user: impl Into<String>) -> Self {
		self.owners.insert(user.into());
		self
	}

	/// Only owners may edit `module_id`.
	pub fn owner_only(mut self, module_id: impl Into<String>) -> Self {
		self.owner_only.insert(module_id.into());
		self
	}

	/// Nobody may edit or delete `module_id`.
	pub fn read_only(mut self, module_id: impl Into<String>) -> Self {
		self.read_only.insert(module_id.into());
		self
	}

	pub fn is_owner(&self, user: Option<&str>) -> bool {
		user.is_some_and(|u| self.owners.contains(u))
	}
}

impl AuthorizationChecker for RoleAuthorizer {
	fn can_edit(&self, user: Option<&str>, module_id: &str) -> bool {
		if self.read_only.contains(module_id) {
			return false;
		}
		self.is_owner(user) || !self.owner_only.contains(module_id)
	}

	fn can_delete(&self, user: Option<&str>, module_id: &str) -> bool {
		!self.read_only.contains(module_id) && self.is_owner(user)
	}

	fn edit_mode(&self, user: &str, _module_id: &str) -> EditMode {
		if self.owners.contains(user) {
			EditMode::OwnerEdit
		} else {
			EditMode::UserEdit
		}
	}
}

/// Modal shown when a permission check fails.
pub fn unauthorized_modal(message: &str) -> Result<Node> {
	notice_modal("Unauthorized", Alert::danger(message))
}

/// A titled modal holding a single alert.
pub(crate) fn notice_modal(title: &str, alert: Alert) -> Result<Node> {
	Modal::new().title(title).body(alert.to_node()?).to_node()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn authorizer() -> RoleAuthorizer {
		RoleAuthorizer::new()
			.owner("admin")
			.owner_only("module-2")
			.read_only("module-3")
	}

	#[rstest]
	#[case(Some("admin"), "module-1", true)]
	#[case(Some("editor"), "module-1", true)]
	#[case(None, "module-1", true)]
	#[case(Some("admin"), "module-2", true)]
	#[case(Some("editor"), "module-2", false)]
	#[case(None, "module-2", false)]
	#[case(Some("admin"), "module-3", false)]
	fn test_can_edit(#[case] user: Option<&str>, #[case] module: &str, #[case] expected: bool) {
		assert_eq!(authorizer().can_edit(user, module), expected);
	}

	#[rstest]
	#[case(Some("admin"), "module-1", true)]
	#[case(Some("editor"), "module-1", false)]
	#[case(None, "module-1", false)]
	#[case(Some("admin"), "module-3", false)]
	fn test_can_delete(#[case] user: Option<&str>, #[case] module: &str, #[case] expected: bool) {
		assert_eq!(authorizer().can_delete(user, module), expected);
	}

	#[test]
	fn test_create_follows_edit() {
		assert!(authorizer().can_create(Some("editor"), "module-9"));
		assert!(!authorizer().can_create(Some("editor"), "module-2"));
	}

	#[test]
	fn test_unauthorized_modal() {
		let html = unauthorized_modal(DELETE_DENIED).unwrap().render_to_string();
		assert!(html.contains("<h3 class=\"modal-title\">Unauthorized</h3>"));
		assert!(html.contains(
			"<div class=\"alert alert-danger\">You do not have permission to delete this content</div>"
		));
	}
}
