//! Attribute sets with class-token and style merging.
//!
//! Ordinary attributes follow last-write-wins: setting a name that already
//! exists drops the old entry and appends the new one. `class` accumulates
//! tokens in a [`ClassList`] and `style` merges declarations in a
//! [`StyleMap`]; both render as a single attribute at the position where
//! they were first configured.

use std::borrow::Cow;

use crate::error::Result;
use crate::security::{
	escape_attr, validate_attribute_name, validate_dom_id, validate_image_src,
	validate_style_property, validate_style_value, validate_url,
};

/// An ordered set of class tokens.
///
/// Adding a token that is already present is a no-op, so repeated
/// configuration never produces duplicate tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
	tokens: Vec<String>,
}

impl ClassList {
	/// Creates an empty class list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds every whitespace-separated token in `tokens`.
	///
	/// Returns the number of tokens that were not already present.
	pub fn add(&mut self, tokens: &str) -> usize {
		let mut added = 0;
		for token in tokens.split_whitespace() {
			if !self.contains(token) {
				self.tokens.push(token.to_string());
				added += 1;
			}
		}
		added
	}

	/// Returns `true` if the token is present.
	pub fn contains(&self, token: &str) -> bool {
		self.tokens.iter().any(|t| t == token)
	}

	/// Returns the tokens in first-seen order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.tokens.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Flattens the list to a space-joined attribute value.
	pub fn to_value(&self) -> String {
		self.tokens.join(" ")
	}
}

/// Inline style declarations keyed by property name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
	entries: Vec<(String, String)>,
}

impl StyleMap {
	/// Sets a declaration, replacing the value of an existing property in place.
	pub fn set(&mut self, property: &str, value: &str) {
		let value = value.trim().to_string();
		match self.entries.iter_mut().find(|(p, _)| p == property) {
			Some(entry) => entry.1 = value,
			None => self.entries.push((property.to_string(), value)),
		}
	}

	/// Returns the value of a property.
	pub fn get(&self, property: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(p, _)| p == property)
			.map(|(_, v)| v.as_str())
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Flattens the declarations to `property: value;` pairs.
	pub fn to_value(&self) -> String {
		self.entries
			.iter()
			.map(|(p, v)| format!("{p}: {v};"))
			.collect::<Vec<_>>()
			.join(" ")
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
	Pair(Cow<'static, str>, Cow<'static, str>),
	Class,
	Style,
}

/// The attributes attached to an element, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
	slots: Vec<Slot>,
	classes: ClassList,
	styles: StyleMap,
}

impl AttributeSet {
	/// Creates an empty attribute set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets an attribute.
	///
	/// `class` and `style` are routed to their merging containers. `id` must
	/// pass [`validate_dom_id`]. `href`, `action` and `formaction` are checked
	/// with [`validate_url`]; `src` with [`validate_image_src`]. Any other name
	/// replaces a previous value.
	pub fn set(
		&mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Result<()> {
		let name = name.into();
		let value = value.into();
		validate_attribute_name(&name)?;

		let lowered = name.to_ascii_lowercase();
		match lowered.as_str() {
			"class" => {
				self.add_class(&value);
				return Ok(());
			}
			"style" => {
				for declaration in value.split(';').filter(|d| !d.trim().is_empty()) {
					let (property, style_value) = declaration.split_once(':').unwrap_or((declaration, ""));
					self.set_style(property.trim(), style_value)?;
				}
				return Ok(());
			}
			_ => {}
		}

		let value = match lowered.as_str() {
			"id" => {
				validate_dom_id(&value)?;
				value
			}
			"href" | "action" | "formaction" => Cow::Owned(validate_url(&value)?),
			"src" => Cow::Owned(validate_image_src(&value)?),
			_ => value,
		};

		self.slots
			.retain(|slot| !matches!(slot, Slot::Pair(existing, _) if existing.eq_ignore_ascii_case(&name)));
		self.slots.push(Slot::Pair(name, value));
		Ok(())
	}

	/// Adds class tokens. The `class` attribute keeps the position of its first use.
	pub fn add_class(&mut self, tokens: &str) {
		if !self.slots.contains(&Slot::Class) {
			self.slots.push(Slot::Class);
		}
		self.classes.add(tokens);
	}

	/// Sets a single style declaration after validating both halves.
	pub fn set_style(&mut self, property: &str, value: &str) -> Result<()> {
		validate_style_property(property)?;
		validate_style_value(property, value)?;
		if !self.slots.contains(&Slot::Style) {
			self.slots.push(Slot::Style);
		}
		self.styles.set(property, value);
		Ok(())
	}

	/// Stores a dimension declaration that was already checked against the
	/// CSS length grammar.
	pub(crate) fn set_checked_style(&mut self, property: &'static str, value: &str) {
		if !self.slots.contains(&Slot::Style) {
			self.slots.push(Slot::Style);
		}
		self.styles.set(property, value);
	}

	/// Returns the effective value of an attribute.
	pub fn get(&self, name: &str) -> Option<Cow<'_, str>> {
		if name.eq_ignore_ascii_case("class") {
			return (!self.classes.is_empty()).then(|| Cow::Owned(self.classes.to_value()));
		}
		if name.eq_ignore_ascii_case("style") {
			return (!self.styles.is_empty()).then(|| Cow::Owned(self.styles.to_value()));
		}
		self.slots.iter().find_map(|slot| match slot {
			Slot::Pair(n, v) if n.eq_ignore_ascii_case(name) => Some(Cow::Borrowed(v.as_ref())),
			_ => None,
		})
	}

	/// Returns `true` if the attribute has an effective value.
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	pub fn classes(&self) -> &ClassList {
		&self.classes
	}

	pub fn styles(&self) -> &StyleMap {
		&self.styles
	}

	/// Iterates over effective `(name, value)` pairs in render order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, Cow<'_, str>)> {
		self.slots.iter().filter_map(|slot| match slot {
			Slot::Pair(n, v) => Some((n.as_ref(), Cow::Borrowed(v.as_ref()))),
			Slot::Class if !self.classes.is_empty() => {
				Some(("class", Cow::Owned(self.classes.to_value())))
			}
			Slot::Style if !self.styles.is_empty() => {
				Some(("style", Cow::Owned(self.styles.to_value())))
			}
			_ => None,
		})
	}

	pub fn len(&self) -> usize {
		self.iter().count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Writes ` name="value"` pairs. Empty values render as bare boolean
	/// attributes.
	pub(crate) fn render_into(&self, output: &mut String) {
		for (name, value) in self.iter() {
			output.push(' ');
			output.push_str(name);
			if !value.is_empty() {
				output.push_str("=\"");
				output.push_str(&escape_attr(&value));
				output.push('"');
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ValidationError;

	fn rendered(attrs: &AttributeSet) -> String {
		let mut out = String::new();
		attrs.render_into(&mut out);
		out
	}

	#[test]
	fn test_class_list_deduplicates() {
		let mut classes = ClassList::new();
		assert_eq!(classes.add("btn btn-primary"), 2);
		assert_eq!(classes.add("btn"), 0);
		assert_eq!(classes.add("  btn-primary   active "), 1);
		assert_eq!(classes.to_value(), "btn btn-primary active");
	}

	#[test]
	fn test_last_write_replaces() {
		let mut attrs = AttributeSet::new();
		attrs.set("id", "a").unwrap();
		attrs.set("title", "t").unwrap();
		attrs.set("id", "b").unwrap();
		assert_eq!(rendered(&attrs), r#" title="t" id="b""#);
	}

	#[test]
	fn test_class_keeps_first_position() {
		let mut attrs = AttributeSet::new();
		attrs.add_class("module");
		attrs.set("id", "m1").unwrap();
		attrs.set("class", "module content-module").unwrap();
		assert_eq!(rendered(&attrs), r#" class="module content-module" id="m1""#);
	}

	#[test]
	fn test_empty_value_renders_bare() {
		let mut attrs = AttributeSet::new();
		attrs.set("type", "checkbox").unwrap();
		attrs.set("checked", "").unwrap();
		assert_eq!(rendered(&attrs), r#" type="checkbox" checked"#);
	}

	#[test]
	fn test_values_are_attribute_escaped() {
		let mut attrs = AttributeSet::new();
		attrs.set("title", r#"a" onmouseover="alert(1)""#).unwrap();
		assert_eq!(
			rendered(&attrs),
			r#" title="a&quot; onmouseover=&quot;alert(1)&quot;""#
		);
	}

	#[test]
	fn test_id_attribute_is_validated() {
		let mut attrs = AttributeSet::new();
		assert!(matches!(
			attrs.set("id", "x\" onclick=\"alert(1)"),
			Err(ValidationError::InvalidId { .. })
		));
		assert!(matches!(attrs.set("ID", ""), Err(ValidationError::InvalidId { .. })));
		assert!(attrs.is_empty());
		attrs.set("id", "module-1").unwrap();
		assert_eq!(attrs.get("id").as_deref(), Some("module-1"));
	}

	#[test]
	fn test_href_is_validated() {
		let mut attrs = AttributeSet::new();
		assert!(attrs.set("href", "/ok").is_ok());
		assert!(matches!(
			attrs.set("HREF", "javascript:alert(1)"),
			Err(ValidationError::DisallowedUrlScheme { .. })
		));
		assert_eq!(attrs.get("href").as_deref(), Some("/ok"));
	}

	#[test]
	fn test_src_accepts_image_data() {
		let mut attrs = AttributeSet::new();
		assert!(attrs.set("src", "data:image/png;base64,AAAA").is_ok());
		assert!(attrs.set("src", "data:text/html,x").is_err());
	}

	#[test]
	fn test_style_attribute_merges() {
		let mut attrs = AttributeSet::new();
		attrs.set("style", "color: red; margin: 0").unwrap();
		attrs.set_style("color", "blue").unwrap();
		assert_eq!(rendered(&attrs), r#" style="color: blue; margin: 0;""#);
	}

	#[test]
	fn test_style_injection_rejected() {
		let mut attrs = AttributeSet::new();
		assert!(attrs.set("style", "background: url(javascript:x)").is_err());
		assert!(attrs.set_style("color", "red; position: fixed").is_err());
	}

	#[test]
	fn test_invalid_attribute_name() {
		let mut attrs = AttributeSet::new();
		assert_eq!(
			attrs.set("on click", "x"),
			Err(ValidationError::InvalidAttributeName("on click".to_string()))
		);
	}

	#[test]
	fn test_empty_class_not_rendered() {
		let mut attrs = AttributeSet::new();
		attrs.add_class("   ");
		assert!(attrs.is_empty());
		assert_eq!(rendered(&attrs), "");
	}
}
