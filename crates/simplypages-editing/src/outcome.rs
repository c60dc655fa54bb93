//! Results of edit handler operations.

use simplypages_core::Node;

/// What an edit operation did.
///
/// Every variant carries renderable nodes, so the response layer never has
/// to special-case approval or permission logic.
#[derive(Debug, Clone)]
pub enum EditOutcome {
	/// Stored content now reflects the mutation. The node is the refreshed
	/// module, or empty when the module was removed.
	Applied(Node),
	/// The change was queued for review. `content` is the module as stored,
	/// unchanged; `notice` tells the submitter the change awaits approval.
	PendingApproval { content: Node, notice: Node },
	/// Nothing changed: the module was missing, the user lacked permission or
	/// the submitted fields were invalid. The node is an explanatory modal.
	Rejected(Node),
}

impl EditOutcome {
	/// The node shown to the submitter: the refreshed module, the pending
	/// notice or the modal.
	pub fn node(&self) -> &Node {
		match self {
			EditOutcome::Applied(node)
			| EditOutcome::PendingApproval { notice: node, .. }
			| EditOutcome::Rejected(node) => node,
		}
	}

	/// The module content the outcome leaves on the page, if any.
	pub fn content(&self) -> Option<&Node> {
		match self {
			EditOutcome::Applied(node) | EditOutcome::PendingApproval { content: node, .. } => {
				Some(node)
			}
			EditOutcome::Rejected(_) => None,
		}
	}

	/// Everything the outcome renders. A pending outcome yields the notice
	/// followed by the unchanged content.
	pub fn into_node(self) -> Node {
		match self {
			EditOutcome::Applied(node) | EditOutcome::Rejected(node) => node,
			EditOutcome::PendingApproval { content, notice } => Node::fragment([notice, content]),
		}
	}

	pub fn is_applied(&self) -> bool {
		matches!(self, EditOutcome::Applied(_))
	}

	pub fn is_pending(&self) -> bool {
		matches!(self, EditOutcome::PendingApproval { .. })
	}

	pub fn is_rejected(&self) -> bool {
		matches!(self, EditOutcome::Rejected(_))
	}

	/// Short label used in trace events.
	pub fn kind(&self) -> &'static str {
		match self {
			EditOutcome::Applied(_) => "applied",
			EditOutcome::PendingApproval { .. } => "pending",
			EditOutcome::Rejected(_) => "rejected",
		}
	}
}
