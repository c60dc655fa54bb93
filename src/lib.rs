//! # SimplyPages
//!
//! Server-side rendered component trees with an out-of-band module editing
//! protocol.
//!
//! Pages are built as a [`Node`](core::Node) tree and serialized once.
//! Text is escaped at a single boundary; raw markup only enters through
//! explicitly trusted constructors. On top of the tree sit a widget catalog,
//! id-addressed modules and an editing protocol that answers every mutation
//! with exactly two htmx out-of-band fragments.
//!
//! ## Feature Flags
//!
//! - `core` - render tree, escaping and id/URL validation
//! - `components` - widgets and modules
//! - `conf` - editing settings and their loaders
//! - `editing` - edit state machine, approval queue, OOB responses
//! - `full` (default) - everything
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "full")]
//! # {
//! use simplypages::prelude::*;
//!
//! let module = ContentModule::new("module-1")
//! 	.unwrap()
//! 	.with_title("Welcome")
//! 	.with_content("Hello <world>");
//! let html = module.render().unwrap();
//! assert!(html.contains("Hello &lt;world&gt;"));
//! # }
//! ```

#[cfg(feature = "components")]
pub mod components;
#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "core")]
pub mod core;
#[cfg(feature = "editing")]
pub mod editing;

/// Common imports.
pub mod prelude {
	#[cfg(feature = "core")]
	pub use crate::core::{
		ClassToken, DomId, ElementBuilder, IntoNode, Node, RenderContext, ValidationError,
	};

	#[cfg(feature = "components")]
	pub use crate::components::{
		Alert, Button, Component, ContentModule, EditMode, EditableModule, Heading, Modal,
		Paragraph, SimpleListModule, Variant, html,
	};

	#[cfg(feature = "conf")]
	pub use crate::conf::{EditingSettings, SettingsError, SettingsLoader};

	#[cfg(feature = "editing")]
	pub use crate::editing::{
		EditError, EditOutcome, EditingEndpoints, InMemoryModuleStore, ModuleStore, OobResponse,
		RoleAuthorizer,
	};
}
