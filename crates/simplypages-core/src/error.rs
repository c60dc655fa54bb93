//! Error types for the render tree and escaping boundary.

use thiserror::Error;

/// Raised when a node, attribute or identifier fails validation.
///
/// Validation always happens while a tree is being constructed. A value of
/// this type means no node was produced, so nothing can be partially rendered.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	/// An identifier that is used as a client-side swap target is malformed.
	#[error("Invalid identifier '{value}': {reason}")]
	InvalidId { value: String, reason: &'static str },

	/// A URL uses a scheme outside the allow-list.
	#[error("{scheme} URLs are not allowed for security reasons")]
	DisallowedUrlScheme { scheme: String },

	/// A free-form CSS value does not match the constrained grammar.
	#[error("Invalid CSS value for '{property}': {value}")]
	InvalidCssValue { property: String, value: String },

	/// An attribute name contains characters that cannot appear in markup.
	#[error("Invalid attribute name: {0}")]
	InvalidAttributeName(String),

	/// A required builder field was never set.
	#[error("Missing required field: {0}")]
	MissingField(&'static str),

	/// The operation is not supported by this kind of node.
	#[error("Unsupported operation: {0}")]
	Unsupported(String),
}

impl ValidationError {
	pub(crate) fn invalid_id(value: &str, reason: &'static str) -> Self {
		Self::InvalidId {
			value: value.to_string(),
			reason,
		}
	}

	pub(crate) fn invalid_css(property: &str, value: &str) -> Self {
		Self::InvalidCssValue {
			property: property.to_string(),
			value: value.to_string(),
		}
	}
}

/// Result type used throughout the core crate.
pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_disallowed_scheme_message() {
		let err = ValidationError::DisallowedUrlScheme {
			scheme: "javascript".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"javascript URLs are not allowed for security reasons"
		);
	}

	#[test]
	fn test_invalid_id_message() {
		let err = ValidationError::invalid_id("a b", "whitespace is not allowed");
		assert_eq!(
			err.to_string(),
			"Invalid identifier 'a b': whitespace is not allowed"
		);
	}
}
