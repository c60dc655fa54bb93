//! Titled text module with optional markdown rendering.

use simplypages_core::{DomId, IntoNode, Markdown, Node, Result};

use crate::component::Component;
use crate::html::div;
use crate::module::{EditMode, Module};

/// A module holding a title and a block of text.
///
/// Content is rendered through the markdown sandbox when `use_markdown` is
/// set (the default), otherwise as escaped text.
///
/// # Examples
///
/// ```
/// use simplypages_components::{Component, ContentModule};
///
/// let module = ContentModule::new("module-1")
/// 	.unwrap()
/// 	.with_title("Public Content")
/// 	.with_content("Plain <text>")
/// 	.with_markdown(false);
/// assert_eq!(
/// 	module.render().unwrap(),
/// 	"<div id=\"module-1\" class=\"module content-module\"><h2 class=\"module-title\">Public Content</h2><div class=\"module-content\">Plain &lt;text&gt;</div></div>"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ContentModule {
	id: DomId,
	title: Option<String>,
	content: Option<String>,
	use_markdown: bool,
	custom_content: Option<Node>,
	edit_mode: EditMode,
}

impl ContentModule {
	pub fn new(id: impl Into<String>) -> Result<Self> {
		Ok(Self {
			id: DomId::new(id)?,
			title: None,
			content: None,
			use_markdown: true,
			custom_content: None,
			edit_mode: EditMode::default(),
		})
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn with_content(mut self, content: impl Into<String>) -> Self {
		self.content = Some(content.into());
		self
	}

	pub fn with_markdown(mut self, enabled: bool) -> Self {
		self.use_markdown = enabled;
		self
	}

	/// Replaces the text content with an arbitrary node.
	pub fn with_custom_content(mut self, content: impl IntoNode) -> Self {
		self.custom_content = Some(content.into_node());
		self
	}

	pub fn with_edit_mode(mut self, mode: EditMode) -> Self {
		self.edit_mode = mode;
		self
	}

	pub fn id(&self) -> &DomId {
		&self.id
	}

	pub fn title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	pub fn content(&self) -> Option<&str> {
		self.content.as_deref()
	}

	pub fn use_markdown(&self) -> bool {
		self.use_markdown
	}

	pub fn edit_mode(&self) -> EditMode {
		self.edit_mode
	}

	pub fn set_title(&mut self, title: Option<String>) {
		self.title = title;
	}

	pub fn set_content(&mut self, content: impl Into<String>) {
		self.content = Some(content.into());
	}

	pub fn set_use_markdown(&mut self, enabled: bool) {
		self.use_markdown = enabled;
	}

	fn content_node(&self) -> Node {
		match (&self.custom_content, &self.content) {
			(Some(custom), _) => custom.clone(),
			(None, Some(text)) if self.use_markdown => Markdown::new(text.clone()).into_node(),
			(None, Some(text)) => Node::text(text.clone()),
			(None, None) => Node::empty(),
		}
	}

	pub fn to_module(&self) -> Result<Module> {
		let mut builder = Module::builder(self.id.as_str())
			.kind("content-module")
			.title_level(2)
			.edit_mode(self.edit_mode)
			.try_child(div().class("module-content").child(self.content_node()).build());
		if let Some(title) = &self.title {
			builder = builder.title(title.clone());
		}
		builder.build()
	}
}

impl Component for ContentModule {
	fn name(&self) -> &'static str {
		"ContentModule"
	}

	fn to_node(&self) -> Result<Node> {
		self.to_module()?.to_node()
	}
}
