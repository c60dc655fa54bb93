//! Buttons

use simplypages_core::{Node, Result};

use super::Extras;
use crate::component::{Component, Size, Variant};
use crate::html::button;

/// The `type` attribute of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonType {
	#[default]
	Button,
	Submit,
	Reset,
}

impl ButtonType {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Button => "button",
			Self::Submit => "submit",
			Self::Reset => "reset",
		}
	}
}

/// A `btn` styled button.
///
/// htmx attributes are set through [`Button::attr`]; any URL-like values are
/// produced by the caller.
///
/// # Examples
///
/// ```
/// use simplypages_components::{Button, Component, Variant};
///
/// let html = Button::new("Save Changes")
/// 	.variant(Variant::Primary)
/// 	.attr("hx-post", "/modules/module-1/update")
/// 	.attr("hx-swap", "none")
/// 	.render()
/// 	.unwrap();
/// assert_eq!(
/// 	html,
/// 	"<button type=\"button\" class=\"btn btn-primary\" hx-post=\"/modules/module-1/update\" hx-swap=\"none\">Save Changes</button>"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Button {
	label: String,
	button_type: ButtonType,
	variant: Variant,
	size: Size,
	full_width: bool,
	disabled: bool,
	id: Option<String>,
	extras: Extras,
}

impl Button {
	pub fn new(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			button_type: ButtonType::Button,
			variant: Variant::Primary,
			size: Size::Md,
			full_width: false,
			disabled: false,
			id: None,
			extras: Extras::default(),
		}
	}

	pub fn submit(label: impl Into<String>) -> Self {
		Self::new(label).button_type(ButtonType::Submit)
	}

	pub fn reset(label: impl Into<String>) -> Self {
		Self::new(label).button_type(ButtonType::Reset)
	}

	pub fn button_type(mut self, button_type: ButtonType) -> Self {
		self.button_type = button_type;
		self
	}

	pub fn variant(mut self, variant: Variant) -> Self {
		self.variant = variant;
		self
	}

	pub fn size(mut self, size: Size) -> Self {
		self.size = size;
		self
	}

	pub fn small(self) -> Self {
		self.size(Size::Sm)
	}

	pub fn full_width(mut self) -> Self {
		self.full_width = true;
		self
	}

	pub fn disabled(mut self) -> Self {
		self.disabled = true;
		self
	}

	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn label(&self) -> &str {
		&self.label
	}
}

extras_setters!(Button);

impl Component for Button {
	fn name(&self) -> &'static str {
		"Button"
	}

	fn to_node(&self) -> Result<Node> {
		let mut builder = button()
			.attr("type", self.button_type.as_str())
			.class("btn")
			.class(&format!("btn-{}", self.variant.as_str()));
		builder = self.extras.apply_classes(builder);
		if self.full_width {
			builder = builder.class("btn-full-width");
		}
		if let Some(suffix) = self.size.suffix() {
			builder = builder.class(&format!("btn-{suffix}"));
		}
		if let Some(id) = &self.id {
			builder = builder.id(id.clone());
		}
		builder = builder.bool_attr("disabled", self.disabled);
		self.extras
			.apply_attrs(builder)
			.text(self.label.clone())
			.build()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn test_default_button() {
		assert_eq!(
			Button::new("Click").render().unwrap(),
			"<button type=\"button\" class=\"btn btn-primary\">Click</button>"
		);
	}

	#[rstest]
	#[case(Button::submit("Send"), "submit")]
	#[case(Button::reset("Reset"), "reset")]
	fn test_button_types(#[case] button: Button, #[case] expected: &str) {
		let html = button.render().unwrap();
		assert!(html.starts_with(&format!("<button type=\"{expected}\"")));
	}

	#[test]
	fn test_button_full_configuration() {
		let html = Button::new("Save")
			.variant(Variant::Success)
			.id("save-btn")
			.disabled()
			.class("extra")
			.full_width()
			.small()
			.width("120px")
			.render()
			.unwrap();
		assert_eq!(
			html,
			"<button type=\"button\" class=\"btn btn-success extra btn-full-width btn-sm\" id=\"save-btn\" disabled style=\"width: 120px;\">Save</button>"
		);
	}

	#[test]
	fn test_button_rejects_bad_id() {
		assert!(Button::new("x").id("a b").to_node().is_err());
	}
}
