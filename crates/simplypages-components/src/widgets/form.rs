//! Form inputs and labelled field helpers.

use simplypages_core::{Node, Result};

use super::Extras;
use crate::component::Component;
use crate::html::{div, input, label, option, select, textarea};
use crate::widgets::Paragraph;

/// The `type` of a [`TextInput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
	#[default]
	Text,
	Email,
	Password,
	Number,
	Date,
	DatetimeLocal,
	Search,
	Url,
	Tel,
	Hidden,
}

impl InputType {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Email => "email",
			Self::Password => "password",
			Self::Number => "number",
			Self::Date => "date",
			Self::DatetimeLocal => "datetime-local",
			Self::Search => "search",
			Self::Url => "url",
			Self::Tel => "tel",
			Self::Hidden => "hidden",
		}
	}
}

/// Single-line `<input class="form-input">`.
#[derive(Debug, Clone)]
pub struct TextInput {
	name: String,
	input_type: InputType,
	value: Option<String>,
	placeholder: Option<String>,
	id: Option<String>,
	required: bool,
	max_length: Option<usize>,
	extras: Extras,
}

impl TextInput {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			input_type: InputType::Text,
			value: None,
			placeholder: None,
			id: None,
			required: false,
			max_length: None,
			extras: Extras::default(),
		}
	}

	pub fn email(name: impl Into<String>) -> Self {
		Self::new(name).input_type(InputType::Email)
	}

	pub fn password(name: impl Into<String>) -> Self {
		Self::new(name).input_type(InputType::Password)
	}

	pub fn hidden(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self::new(name).input_type(InputType::Hidden).value(value)
	}

	pub fn input_type(mut self, input_type: InputType) -> Self {
		self.input_type = input_type;
		self
	}

	pub fn value(mut self, value: impl Into<String>) -> Self {
		self.value = Some(value.into());
		self
	}

	pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}
}

extras_setters!(TextInput);

impl Component for TextInput {
	fn name(&self) -> &'static str {
		"TextInput"
	}

	fn to_node(&self) -> Result<Node> {
		let mut builder = input()
			.attr("type", self.input_type.as_str())
			.attr("name", self.name.clone())
			.class("form-input");
		builder = self.extras.apply_classes(builder);
		if let Some(id) = &self.id {
			builder = builder.id(id.clone());
		}
		if let Some(value) = &self.value {
			builder = builder.attr("value", value.clone());
		}
		builder = builder
			.attr_opt("placeholder", self.placeholder.clone())
			.attr_opt("maxlength", self.max_length.map(|n| n.to_string()))
			.bool_attr("required", self.required);
		self.extras.apply_attrs(builder).build()
	}
}

/// Multi-line `<textarea class="form-textarea">`.
#[derive(Debug, Clone)]
pub struct TextArea {
	name: String,
	value: Option<String>,
	rows: Option<u32>,
	placeholder: Option<String>,
	id: Option<String>,
	extras: Extras,
}

impl TextArea {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: None,
			rows: None,
			placeholder: None,
			id: None,
			extras: Extras::default(),
		}
	}

	pub fn value(mut self, value: impl Into<String>) -> Self {
		self.value = Some(value.into());
		self
	}

	pub fn rows(mut self, rows: u32) -> Self {
		self.rows = Some(rows);
		self
	}

	pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}
}

extras_setters!(TextArea);

impl Component for TextArea {
	fn name(&self) -> &'static str {
		"TextArea"
	}

	fn to_node(&self) -> Result<Node> {
		let mut builder = textarea()
			.attr("name", self.name.clone())
			.class("form-textarea");
		builder = self.extras.apply_classes(builder);
		if let Some(id) = &self.id {
			builder = builder.id(id.clone());
		}
		builder = builder
			.attr_opt("rows", self.rows.map(|n| n.to_string()))
			.attr_opt("placeholder", self.placeholder.clone());
		builder = self.extras.apply_attrs(builder);
		if let Some(value) = &self.value {
			builder = builder.text(value.clone());
		}
		builder.build()
	}
}

/// `<div class="form-checkbox">` holding the input and an optional label.
#[derive(Debug, Clone)]
pub struct Checkbox {
	name: String,
	value: String,
	label: Option<String>,
	checked: bool,
	required: bool,
	disabled: bool,
	id: Option<String>,
	extras: Extras,
}

impl Checkbox {
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
			label: None,
			checked: false,
			required: false,
			disabled: false,
			id: None,
			extras: Extras::default(),
		}
	}

	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn checked(mut self, checked: bool) -> Self {
		self.checked = checked;
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
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
}

extras_setters!(Checkbox);

impl Component for Checkbox {
	fn name(&self) -> &'static str {
		"Checkbox"
	}

	fn to_node(&self) -> Result<Node> {
		let mut field = input()
			.attr("type", "checkbox")
			.class("checkbox-input")
			.attr("name", self.name.clone())
			.attr("value", self.value.clone());
		if let Some(id) = &self.id {
			field = field.id(id.clone());
		}
		field = field
			.bool_attr("checked", self.checked)
			.bool_attr("required", self.required)
			.bool_attr("disabled", self.disabled);

		let mut wrapper = self
			.extras
			.apply(div().class("form-checkbox"))
			.try_child(field.build());
		if let Some(text) = &self.label {
			let mut label = label().class("checkbox-label");
			if let Some(id) = &self.id {
				label = label.attr("for", id.clone());
			}
			wrapper = wrapper.try_child(label.text(text.clone()).build());
		}
		wrapper.build()
	}
}

/// One `<option>` of a [`Select`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
	pub value: String,
	pub label: String,
	pub selected: bool,
}

/// `<select class="form-select">`.
#[derive(Debug, Clone)]
pub struct Select {
	name: String,
	options: Vec<SelectOption>,
	extras: Extras,
}

impl Select {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			options: Vec::new(),
			extras: Extras::default(),
		}
	}

	pub fn option(
		mut self,
		value: impl Into<String>,
		label: impl Into<String>,
		selected: bool,
	) -> Self {
		self.options.push(SelectOption {
			value: value.into(),
			label: label.into(),
			selected,
		});
		self
	}

	pub fn options(&self) -> &[SelectOption] {
		&self.options
	}
}

extras_setters!(Select);

impl Component for Select {
	fn name(&self) -> &'static str {
		"Select"
	}

	fn to_node(&self) -> Result<Node> {
		let mut builder = self.extras.apply(
			select()
				.attr("name", self.name.clone())
				.class("form-select"),
		);
		for opt in &self.options {
			builder = builder.try_child(
				option()
					.attr("value", opt.value.clone())
					.bool_attr("selected", opt.selected)
					.text(opt.label.clone())
					.build(),
			);
		}
		builder.build()
	}
}

fn labelled(text: &str, control: Result<Node>) -> Result<Node> {
	div()
		.class("form-field")
		.try_child(Paragraph::new(format!("{text}:")).class("form-label").to_node())
		.try_child(control)
		.build()
}

/// `div.form-field` with a `Label:` paragraph and a full-width text input.
///
/// ```
/// use simplypages_components::text_field;
///
/// let html = text_field("Title", "title", "Hello").unwrap().render_to_string();
/// assert_eq!(
/// 	html,
/// 	"<div class=\"form-field\"><p class=\"form-label\">Title:</p><input type=\"text\" name=\"title\" class=\"form-input\" value=\"Hello\" style=\"max-width: 100%;\" /></div>"
/// );
/// ```
pub fn text_field(label: &str, name: &str, value: &str) -> Result<Node> {
	labelled(
		label,
		TextInput::new(name).value(value).max_width("100%").to_node(),
	)
}

/// `div.form-field` with a `Label:` paragraph and a full-width textarea.
pub fn text_area_field(label: &str, name: &str, value: &str, rows: u32) -> Result<Node> {
	labelled(
		label,
		TextArea::new(name)
			.value(value)
			.rows(rows)
			.max_width("100%")
			.to_node(),
	)
}

/// `div.form-field` with a labelled checkbox submitting `true`.
pub fn checkbox_field(label: &str, name: &str, checked: bool) -> Result<Node> {
	div()
		.class("form-field")
		.try_child(
			Checkbox::new(name, "true")
				.label(label)
				.checked(checked)
				.to_node(),
		)
		.build()
}

/// `div.form-field` with a `Label:` paragraph and a select.
pub fn select_field(label: &str, select: Select) -> Result<Node> {
	labelled(label, select.to_node())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(TextInput::new("username"), "<input type=\"text\" name=\"username\" class=\"form-input\" />")]
	#[case(TextInput::email("email").value("user@example.com"), "<input type=\"email\" name=\"email\" class=\"form-input\" value=\"user@example.com\" />")]
	#[case(TextInput::hidden("user", "admin"), "<input type=\"hidden\" name=\"user\" class=\"form-input\" value=\"admin\" />")]
	fn test_text_input(#[case] input: TextInput, #[case] expected: &str) {
		assert_eq!(input.render().unwrap(), expected);
	}

	#[test]
	fn test_text_input_value_is_attribute_encoded() {
		let html = TextInput::new("title")
			.value("\"><script>x</script>")
			.render()
			.unwrap();
		assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;x&lt;/script&gt;\""));
	}

	#[test]
	fn test_text_area() {
		let html = TextArea::new("bio").rows(5).value("Hello").render().unwrap();
		assert_eq!(
			html,
			"<textarea name=\"bio\" class=\"form-textarea\" rows=\"5\">Hello</textarea>"
		);
	}

	#[test]
	fn test_checkbox_with_label() {
		let html = Checkbox::new("agree", "yes")
			.label("Agree to terms")
			.id("agree-id")
			.checked(true)
			.render()
			.unwrap();
		assert_eq!(
			html,
			"<div class=\"form-checkbox\"><input type=\"checkbox\" class=\"checkbox-input\" name=\"agree\" value=\"yes\" id=\"agree-id\" checked /><label class=\"checkbox-label\" for=\"agree-id\">Agree to terms</label></div>"
		);
	}

	#[test]
	fn test_checkbox_without_label() {
		let html = Checkbox::new("agree", "yes").required().disabled().render().unwrap();
		assert!(html.contains(" required disabled />"));
		assert!(!html.contains("<label"));
	}

	#[test]
	fn test_select() {
		let html = Select::new("width")
			.option("6", "1/2 (6/12)", false)
			.option("12", "Full (12/12)", true)
			.render()
			.unwrap();
		assert_eq!(
			html,
			"<select name=\"width\" class=\"form-select\"><option value=\"6\">1/2 (6/12)</option><option value=\"12\" selected>Full (12/12)</option></select>"
		);
	}

	#[test]
	fn test_text_area_field() {
		let html = text_area_field("Content", "content", "Body", 15)
			.unwrap()
			.render_to_string();
		assert!(html.starts_with("<div class=\"form-field\"><p class=\"form-label\">Content:</p>"));
		assert!(html.contains("rows=\"15\""));
	}

	#[test]
	fn test_checkbox_field() {
		let html = checkbox_field("Render as Markdown", "useMarkdown", true)
			.unwrap()
			.render_to_string();
		assert!(html.contains("name=\"useMarkdown\" value=\"true\" checked"));
		assert!(html.contains("Render as Markdown</label>"));
	}
}
