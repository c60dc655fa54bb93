//! Modal dialog
//!
//! A modal renders as a backdrop holding a container with header, body and
//! footer sections. The close handlers interpolate the modal id into inline
//! script, so the id is checked with
//! [`validate_modal_id`](simplypages_core::security::validate_modal_id).

use simplypages_core::security::validate_modal_id;
use simplypages_core::{IntoNode, Node, Result};

use crate::component::Component;
use crate::html::{button, div, h3};

/// Default id of a modal that was not given one.
pub const DEFAULT_MODAL_ID: &str = "modal";

/// # Examples
///
/// ```
/// use simplypages_components::{Alert, Component, Modal};
///
/// let modal = Modal::new()
/// 	.title("Error")
/// 	.body(Alert::danger("Module not found").to_node().unwrap());
/// let html = modal.render().unwrap();
/// assert!(html.contains("<h3 class=\"modal-title\">Error</h3>"));
/// assert!(html.contains("<div class=\"alert alert-danger\">Module not found</div>"));
/// ```
#[derive(Debug, Clone)]
pub struct Modal {
	modal_id: String,
	title: Option<String>,
	body: Option<Node>,
	footer: Option<Node>,
	close_on_backdrop: bool,
	close_on_escape: bool,
	show_close_button: bool,
}

impl Default for Modal {
	fn default() -> Self {
		Self::new()
	}
}

impl Modal {
	pub fn new() -> Self {
		Self {
			modal_id: DEFAULT_MODAL_ID.to_string(),
			title: None,
			body: None,
			footer: None,
			close_on_backdrop: true,
			close_on_escape: true,
			show_close_button: true,
		}
	}

	/// Sets the backdrop id. Must start with a letter.
	pub fn modal_id(mut self, id: impl Into<String>) -> Self {
		self.modal_id = id.into();
		self
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn body(mut self, body: impl IntoNode) -> Self {
		self.body = Some(body.into_node());
		self
	}

	pub fn footer(mut self, footer: impl IntoNode) -> Self {
		self.footer = Some(footer.into_node());
		self
	}

	pub fn close_on_backdrop(mut self, enabled: bool) -> Self {
		self.close_on_backdrop = enabled;
		self
	}

	pub fn close_on_escape(mut self, enabled: bool) -> Self {
		self.close_on_escape = enabled;
		self
	}

	pub fn show_close_button(mut self, show: bool) -> Self {
		self.show_close_button = show;
		self
	}

	pub fn get_title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	fn remove_script(&self) -> String {
		format!("document.getElementById('{}').remove()", self.modal_id)
	}

	fn header(&self) -> Result<Option<Node>> {
		if self.title.is_none() && !self.show_close_button {
			return Ok(None);
		}
		let mut header = div().class("modal-header");
		header = match &self.title {
			Some(title) => header.try_child(h3().class("modal-title").text(title.clone()).build()),
			// Spacer keeps the close button right-aligned.
			None => header.try_child(div().build()),
		};
		if self.show_close_button {
			header = header.try_child(
				button()
					.attr("type", "button")
					.class("modal-close")
					.attr("onclick", self.remove_script())
					.attr("aria-label", "Close")
					.text("\u{d7}")
					.build(),
			);
		}
		header.build().map(Some)
	}
}

impl Component for Modal {
	fn name(&self) -> &'static str {
		"Modal"
	}

	fn to_node(&self) -> Result<Node> {
		validate_modal_id(&self.modal_id)?;

		let mut container = div()
			.class("modal-container")
			.attr("onclick", "event.stopPropagation()");
		if let Some(header) = self.header()? {
			container = container.child(header);
		}
		if let Some(body) = &self.body {
			container = container.try_child(div().class("modal-body").child(body.clone()).build());
		}
		if let Some(footer) = &self.footer {
			container =
				container.try_child(div().class("modal-footer").child(footer.clone()).build());
		}

		let mut backdrop = div().class("modal-backdrop").id(self.modal_id.clone());
		if self.close_on_backdrop {
			backdrop = backdrop.attr("onclick", self.remove_script());
		}
		if self.close_on_escape {
			backdrop = backdrop.attr("onkeydown", "if(event.key === 'Escape') this.remove()");
		}
		backdrop
			.attr("tabindex", "0")
			.try_child(container.build())
			.build()
	}
}
