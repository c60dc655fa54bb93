//! The editing capability of a module.

use indexmap::IndexMap;
use simplypages_components::{
	ContentModule, SimpleListModule, checkbox_field, text_area_field, text_field,
};
use simplypages_conf::EditingSettings;
use simplypages_core::{Node, Result};

/// Submitted form fields in submission order.
pub type Fields = IndexMap<String, String>;

/// Field names the protocol reserves for itself.
pub(crate) const CONTROL_FIELDS: &[&str] = &["user", "editMode"];

/// Reads a checkbox value. Browsers send `on` for a value-less checkbox.
pub fn is_checked(fields: &Fields, name: &str) -> bool {
	fields
		.get(name)
		.is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "on" | "1"))
}

/// Result of validating submitted fields.
///
/// An invalid outcome always carries at least one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
	errors: Vec<String>,
}

impl ValidationOutcome {
	pub fn valid() -> Self {
		Self::default()
	}

	pub fn invalid(message: impl Into<String>) -> Self {
		Self {
			errors: vec![message.into()],
		}
	}

	/// Adds a message, making the outcome invalid.
	pub fn push(&mut self, message: impl Into<String>) {
		self.errors.push(message.into());
	}

	/// Combines two outcomes, keeping every message.
	pub fn merge(mut self, other: ValidationOutcome) -> Self {
		self.errors.extend(other.errors);
		self
	}

	pub fn is_valid(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn errors(&self) -> &[String] {
		&self.errors
	}

	/// Messages joined for display.
	pub fn message(&self) -> String {
		self.errors.join(", ")
	}
}

/// A nested entity shown in the edit modal's children section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableChild {
	pub id: String,
	pub label: String,
	pub summary: String,
}

/// A module whose properties can be edited through a form.
pub trait Editable {
	/// Form fields for the module's own properties.
	fn edit_view(&self, settings: &EditingSettings) -> Result<Node>;

	fn validate(&self, fields: &Fields, settings: &EditingSettings) -> ValidationOutcome;

	/// Writes validated fields into the module.
	fn apply_edits(&mut self, fields: &Fields);

	/// Nested entities listed in the edit modal.
	fn editable_children(&self) -> Vec<EditableChild> {
		Vec::new()
	}
}

fn check_title(fields: &Fields, settings: &EditingSettings) -> ValidationOutcome {
	match fields.get("title") {
		Some(title) if title.chars().count() > settings.max_title_length => ValidationOutcome::invalid(
			format!("Title must be less than {} characters", settings.max_title_length),
		),
		_ => ValidationOutcome::valid(),
	}
}

fn title_from(fields: &Fields) -> Option<Option<String>> {
	fields.get("title").map(|title| {
		let title = title.trim();
		(!title.is_empty()).then(|| title.to_string())
	})
}

impl Editable for ContentModule {
	fn edit_view(&self, _settings: &EditingSettings) -> Result<Node> {
		Ok(Node::fragment([
			text_field("Title", "title", self.title().unwrap_or_default())?,
			text_area_field("Content", "content", self.content().unwrap_or_default(), 15)?,
			checkbox_field("Render as Markdown", "useMarkdown", self.use_markdown())?,
		]))
	}

	fn validate(&self, fields: &Fields, settings: &EditingSettings) -> ValidationOutcome {
		let mut outcome = check_title(fields, settings);
		if fields.get("content").is_none_or(|c| c.trim().is_empty()) {
			outcome.push("Content cannot be empty");
		}
		outcome
	}

	fn apply_edits(&mut self, fields: &Fields) {
		if let Some(title) = title_from(fields) {
			self.set_title(title);
		}
		if let Some(content) = fields.get("content") {
			self.set_content(content.clone());
		}
		// An unchecked checkbox is simply absent from the form.
		self.set_use_markdown(is_checked(fields, "useMarkdown"));
	}
}

impl Editable for SimpleListModule {
	fn edit_view(&self, _settings: &EditingSettings) -> Result<Node> {
		text_field("List Title", "title", self.title().unwrap_or_default())
	}

	fn validate(&self, fields: &Fields, settings: &EditingSettings) -> ValidationOutcome {
		check_title(fields, settings)
	}

	fn apply_edits(&mut self, fields: &Fields) {
		if let Some(title) = title_from(fields) {
			self.set_title(title);
		}
	}

	fn editable_children(&self) -> Vec<EditableChild> {
		self.items()
			.iter()
			.enumerate()
			.map(|(i, item)| EditableChild {
				id: item.id().to_string(),
				label: format!("Item {}", i + 1),
				summary: item.text().to_string(),
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn fields(pairs: &[(&str, &str)]) -> Fields {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	fn content() -> ContentModule {
		ContentModule::new("module-1")
			.unwrap()
			.with_title("Public Content")
			.with_content("Original")
	}

	#[test]
	fn test_content_edit_view_fields() {
		let html = content()
			.edit_view(&EditingSettings::default())
			.unwrap()
			.render_to_string();
		assert!(html.contains("name=\"title\""));
		assert!(html.contains("value=\"Public Content\""));
		assert!(html.contains("rows=\"15\""));
		assert!(html.contains(">Original</textarea>"));
		assert!(html.contains("Render as Markdown"));
		assert!(html.contains(" checked"));
	}

	#[rstest]
	#[case(&[("title", "T"), ("content", "Body")], true)]
	#[case(&[("title", "T"), ("content", "   ")], false)]
	#[case(&[("title", "T")], false)]
	fn test_content_validation(#[case] pairs: &[(&str, &str)], #[case] valid: bool) {
		let outcome = content().validate(&fields(pairs), &EditingSettings::default());
		assert_eq!(outcome.is_valid(), valid);
	}

	#[test]
	fn test_title_length_uses_settings() {
		let settings = EditingSettings {
			max_title_length: 5,
			..EditingSettings::default()
		};
		let outcome = content().validate(&fields(&[("title", "too long"), ("content", "x")]), &settings);
		assert_eq!(outcome.message(), "Title must be less than 5 characters");
	}

	#[test]
	fn test_content_apply_edits() {
		let mut module = content();
		module.apply_edits(&fields(&[
			("title", "Updated"),
			("content", "Updated by admin"),
			("useMarkdown", "true"),
		]));
		assert_eq!(module.title(), Some("Updated"));
		assert_eq!(module.content(), Some("Updated by admin"));
		assert!(module.use_markdown());

		module.apply_edits(&fields(&[("title", ""), ("content", "Plain")]));
		assert_eq!(module.title(), None);
		assert!(!module.use_markdown());
	}

	#[test]
	fn test_list_children() {
		let list = SimpleListModule::new("module-9")
			.unwrap()
			.with_item("Alpha")
			.with_item("Beta");
		let children = list.editable_children();
		assert_eq!(
			children[1],
			EditableChild {
				id: "item-1".to_string(),
				label: "Item 2".to_string(),
				summary: "Beta".to_string(),
			}
		);
	}

	#[rstest]
	#[case("on", true)]
	#[case("TRUE", true)]
	#[case("1", true)]
	#[case("false", false)]
	fn test_is_checked(#[case] value: &str, #[case] expected: bool) {
		assert_eq!(is_checked(&fields(&[("flag", value)]), "flag"), expected);
	}

	#[test]
	fn test_invalid_always_has_message() {
		let outcome = ValidationOutcome::invalid("bad").merge(ValidationOutcome::valid());
		assert!(!outcome.is_valid());
		assert_eq!(outcome.errors(), ["bad".to_string()]);
	}
}
