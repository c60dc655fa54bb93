//! Constrained grammar for inline style values.
//!
//! Style attributes accept free-form text in HTML, which makes them an
//! injection vector (`width: 1px; background: url(javascript:...)`). Values
//! set through the builder API are checked here first.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, ValidationError};

static CSS_LENGTH: LazyLock<Option<Regex>> = LazyLock::new(|| {
	Regex::new(r"^(?:auto|[+-]?0|\d+(?:\.\d+)?(?:px|%|em|rem|vw|vh))$").ok()
});

/// Validates a CSS length used by dimension setters.
///
/// Accepts `auto`, `0` (optionally signed) and an unsigned number followed
/// by one of `px`, `%`, `em`, `rem`, `vw` or `vh`. Anything else, including
/// `;`, parentheses and multiple tokens, is rejected.
///
/// # Examples
///
/// ```
/// use simplypages_core::security::validate_css_length;
///
/// assert!(validate_css_length("width", "100px").is_ok());
/// assert!(validate_css_length("width", "12.5%").is_ok());
/// assert!(validate_css_length("width", "auto").is_ok());
/// assert!(validate_css_length("width", "100px; background: red").is_err());
/// assert!(validate_css_length("width", "calc(100% - 1px)").is_err());
/// ```
pub fn validate_css_length(property: &str, value: &str) -> Result<()> {
	let matches = CSS_LENGTH
		.as_ref()
		.is_some_and(|pattern| pattern.is_match(value));
	if matches {
		Ok(())
	} else {
		tracing::warn!(property, value_len = value.len(), "rejected css length");
		Err(ValidationError::invalid_css(property, value))
	}
}

/// Validates a style property name (`max-width`, `-webkit-box`).
pub fn validate_style_property(property: &str) -> Result<()> {
	let valid = !property.is_empty()
		&& property.chars().all(|c| matches!(c, 'a'..='z' | '-'))
		&& property.chars().any(|c| c != '-');
	if valid {
		Ok(())
	} else {
		Err(ValidationError::invalid_css(property, ""))
	}
}

/// Validates a general style value.
///
/// Rejects characters that could close the declaration, open a function
/// call, or escape out of the attribute.
pub fn validate_style_value(property: &str, value: &str) -> Result<()> {
	let value = value.trim();
	if value.is_empty() || value.contains([';', '{', '}', '<', '>', '"', '\\', '(']) {
		tracing::warn!(property, value_len = value.len(), "rejected style value");
		return Err(ValidationError::invalid_css(property, value));
	}
	Ok(())
}
