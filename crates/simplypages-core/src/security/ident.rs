//! Identifier validation for values interpolated into selectors and scripts.
//!
//! Module ids and modal container ids end up inside `hx-target="#..."`,
//! `document.getElementById('...')` and similar expressions on the client,
//! so they are restricted to `[A-Za-z0-9_-]+`.

use std::fmt;

use crate::error::{Result, ValidationError};

fn is_ident_char(ch: char) -> bool {
	matches!(ch, 'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_')
}

/// Validates a DOM id used as a client-observable swap target.
///
/// # Examples
///
/// ```
/// use simplypages_core::security::validate_dom_id;
///
/// assert!(validate_dom_id("module-9").is_ok());
/// assert!(validate_dom_id("edit_modal").is_ok());
/// assert!(validate_dom_id("x').remove();alert('xss');//").is_err());
/// assert!(validate_dom_id("").is_err());
/// ```
pub fn validate_dom_id(value: &str) -> Result<()> {
	if value.is_empty() {
		return Err(ValidationError::invalid_id(value, "must not be empty"));
	}
	if !value.chars().all(is_ident_char) {
		tracing::warn!(value_len = value.len(), "rejected dom id");
		return Err(ValidationError::invalid_id(
			value,
			"only letters, digits, '-' and '_' are allowed",
		));
	}
	Ok(())
}

/// Validates a modal id, which must additionally start with a letter.
pub fn validate_modal_id(value: &str) -> Result<()> {
	validate_dom_id(value)?;
	if !value.starts_with(|c: char| c.is_ascii_alphabetic()) {
		return Err(ValidationError::invalid_id(value, "must start with a letter"));
	}
	Ok(())
}

/// Validates a single class token.
pub fn validate_class_token(value: &str) -> Result<()> {
	if value.is_empty() || !value.chars().all(is_ident_char) {
		return Err(ValidationError::invalid_id(value, "invalid class token"));
	}
	Ok(())
}

/// Validates an attribute name.
///
/// Accepts `[A-Za-z_:][A-Za-z0-9_:.-]*`, which covers `data-*`, `aria-*`
/// and the `hx-*` family.
pub fn validate_attribute_name(name: &str) -> Result<()> {
	let mut chars = name.chars();
	let valid_start = chars
		.next()
		.is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == ':');
	let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '-'));
	if valid_start && valid_rest {
		Ok(())
	} else {
		Err(ValidationError::InvalidAttributeName(name.to_string()))
	}
}

/// A validated DOM id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomId(String);

impl DomId {
	/// Validates and wraps an id.
	pub fn new(value: impl Into<String>) -> Result<Self> {
		let value = value.into();
		validate_dom_id(&value)?;
		Ok(Self(value))
	}

	/// Returns the id as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns the id as a CSS selector (`#id`).
	pub fn selector(&self) -> String {
		format!("#{}", self.0)
	}
}

impl fmt::Display for DomId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for DomId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl TryFrom<&str> for DomId {
	type Error = ValidationError;

	fn try_from(value: &str) -> Result<Self> {
		Self::new(value)
	}
}

/// A validated class token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassToken(String);

impl ClassToken {
	/// Validates and wraps a class token.
	pub fn new(value: impl Into<String>) -> Result<Self> {
		let value = value.into();
		validate_class_token(&value)?;
		Ok(Self(value))
	}

	/// Returns the token as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns the token as a CSS selector (`.token`).
	pub fn selector(&self) -> String {
		format!(".{}", self.0)
	}
}

impl fmt::Display for ClassToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
