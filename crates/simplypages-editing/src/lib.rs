//! # SimplyPages Editing
//!
//! The module editing protocol: what happens between a click on a module's
//! edit button and the page showing the result.
//!
//! ## Flow
//!
//! 1. `GET /edit/{module}` renders an edit modal built by
//!    [`EditModalBuilder`] into the modal container.
//! 2. Saving posts the form. The [`EditStateMachine`] decides the effect
//!    from the operation and the [`EditMode`](simplypages_components::EditMode):
//!    owners apply directly, users queue the change in the [`ApprovalQueue`].
//! 3. The answer is an [`OobResponse`] with exactly two out-of-band
//!    fragments: one clears the modal container, one refreshes the page.
//!
//! Nested entities (list items) follow the same protocol under a scoped
//! [`StateKey`] `parent/child`.
//!
//! ## Entry points
//!
//! - [`EditingEndpoints`]: `http::Request` in, `http::Response` out
//! - [`StoreEditHandler`]: the [`EditHandler`] / [`ChildEditHandler`]
//!   implementation over a [`ModuleStore`]
//! - [`OobResponse`]: response assembly on its own

pub mod approval;
pub mod auth;
pub mod editable;
pub mod endpoints;
pub mod error;
pub mod handler;
pub mod modal;
pub mod oob;
pub mod outcome;
pub mod state;
pub mod store;

pub use approval::{AppliedChange, ApprovalQueue, PendingChange, PendingEdit};
pub use auth::{AuthorizationChecker, RoleAuthorizer, unauthorized_modal};
pub use editable::{Editable, EditableChild, Fields, ValidationOutcome, is_checked};
pub use endpoints::EditingEndpoints;
pub use error::{EditError, Result};
pub use handler::{ChildEditHandler, EditHandler, EditRequest, StoreEditHandler};
pub use modal::EditModalBuilder;
pub use oob::{OobResponse, RefreshRegion, SwapDirective, SwapTarget};
pub use outcome::EditOutcome;
pub use state::{Decision, EditOperation, EditStateMachine, ModuleState, StateKey, decide};
pub use store::{
	DEFAULT_WIDTH, InMemoryModuleStore, ModuleContent, ModuleStore, PageRenderer, StoredModule,
	content_module,
};
