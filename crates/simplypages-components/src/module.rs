//! Modules: addressable, independently editable page sections.
//!
//! A [`Module`] wraps content with a stable DOM id that the editing protocol
//! uses as a swap target. Modules are sized by the layout row that holds
//! them, so the dimension setters on [`ModuleBuilder`] are rejected.

use std::fmt;
use std::str::FromStr;

use simplypages_core::security::ClassToken;
use simplypages_core::{DomId, IntoNode, Node, Result, ValidationError};

use crate::component::Component;
use crate::html::{div, heading};

/// Whether a mutation applies immediately or is queued for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditMode {
	/// Changes apply immediately
	#[default]
	OwnerEdit,
	/// Changes are staged for approval
	UserEdit,
}

impl EditMode {
	/// Query-parameter form (`owner` / `user`)
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::OwnerEdit => "owner",
			Self::UserEdit => "user",
		}
	}

	pub fn is_owner(&self) -> bool {
		matches!(self, Self::OwnerEdit)
	}
}

impl fmt::Display for EditMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for EditMode {
	type Err = ValidationError;

	/// Accepts `owner`, `owner_edit`, `user` and `user_edit` in any case.
	fn from_str(s: &str) -> Result<Self> {
		match s.trim().to_ascii_lowercase().as_str() {
			"owner" | "owner_edit" | "owner-edit" => Ok(Self::OwnerEdit),
			"user" | "user_edit" | "user-edit" => Ok(Self::UserEdit),
			other => Err(ValidationError::Unsupported(format!(
				"unknown edit mode '{other}'"
			))),
		}
	}
}

const MODULE_SIZING: &str = "modules are sized by their layout row";

/// A configured module. Produced by [`ModuleBuilder::build`].
#[derive(Debug, Clone)]
pub struct Module {
	id: DomId,
	kind: Option<ClassToken>,
	title: Option<String>,
	title_level: u8,
	content: Vec<Node>,
	edit_mode: EditMode,
}

impl Module {
	pub fn builder(id: impl Into<String>) -> ModuleBuilder {
		ModuleBuilder::new(id)
	}

	pub fn id(&self) -> &DomId {
		&self.id
	}

	pub fn title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	pub fn edit_mode(&self) -> EditMode {
		self.edit_mode
	}
}

impl Component for Module {
	fn name(&self) -> &'static str {
		"Module"
	}

	fn to_node(&self) -> Result<Node> {
		let mut builder = div().id(self.id.as_str()).class("module");
		if let Some(kind) = &self.kind {
			builder = builder.class(kind.as_str());
		}
		if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
			builder = builder.try_child(
				heading(self.title_level)
					.class("module-title")
					.text(title.to_string())
					.build(),
			);
		}
		builder.children(self.content.iter().cloned()).build()
	}
}

/// Chained configuration for a [`Module`].
#[derive(Debug)]
#[must_use = "a module builder does nothing until `build` is called"]
pub struct ModuleBuilder {
	id: String,
	kind: Option<String>,
	title: Option<String>,
	title_level: u8,
	content: Vec<Node>,
	edit_mode: EditMode,
	error: Option<ValidationError>,
}

impl ModuleBuilder {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			kind: None,
			title: None,
			title_level: 2,
			content: Vec::new(),
			edit_mode: EditMode::default(),
			error: None,
		}
	}

	/// Sets the kind class (`content-module`, `simple-list-module`, ...).
	pub fn kind(mut self, class: impl Into<String>) -> Self {
		self.kind = Some(class.into());
		self
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Heading level for the title (default 2).
	pub fn title_level(mut self, level: u8) -> Self {
		self.title_level = level;
		self
	}

	pub fn child(mut self, child: impl IntoNode) -> Self {
		self.content.push(child.into_node());
		self
	}

	pub fn try_child<N: IntoNode>(mut self, child: Result<N>) -> Self {
		match child {
			Ok(child) => self.child(child),
			Err(err) => {
				self.error.get_or_insert(err);
				self
			}
		}
	}

	pub fn edit_mode(mut self, mode: EditMode) -> Self {
		self.edit_mode = mode;
		self
	}

	fn unsupported(mut self, setter: &str) -> Self {
		self.error.get_or_insert(ValidationError::Unsupported(format!(
			"{setter}: {MODULE_SIZING}"
		)));
		self
	}

	/// Always rejected.
	pub fn width(self, _value: &str) -> Self {
		self.unsupported("width")
	}

	/// Always rejected.
	pub fn max_width(self, _value: &str) -> Self {
		self.unsupported("max_width")
	}

	/// Always rejected.
	pub fn min_width(self, _value: &str) -> Self {
		self.unsupported("min_width")
	}

	pub fn build(self) -> Result<Module> {
		if let Some(err) = self.error {
			tracing::debug!(module_id = %self.id, error = %err, "module construction rejected");
			return Err(err);
		}
		let id = DomId::new(self.id)?;
		let kind = self.kind.map(ClassToken::new).transpose()?;
		Ok(Module {
			id,
			kind,
			title: self.title,
			title_level: self.title_level,
			content: self.content,
			edit_mode: self.edit_mode,
		})
	}
}
