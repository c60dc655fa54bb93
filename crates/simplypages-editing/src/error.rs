//! Editing protocol errors.
//!
//! Only faults surface here. Expected branches of the edit flow (approval
//! required, module missing, permission denied) are rendered as nodes and
//! travel through [`EditOutcome`](crate::EditOutcome) instead.

use http::header::{CONTENT_TYPE, HeaderValue};
use http::{Response, StatusCode};
use simplypages_conf::SettingsError;
use simplypages_core::ValidationError;

/// Error raised by the editing layer.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum EditError {
	/// An id, URL or CSS value failed validation while building a node.
	#[error(transparent)]
	Validation(#[from] ValidationError),

	#[error("Forbidden: {0}")]
	Forbidden(String),

	#[error("Not found: {0}")]
	NotFound(String),

	/// Malformed route segment or form body.
	#[error("Bad request: {0}")]
	BadRequest(String),

	#[error(transparent)]
	Settings(#[from] SettingsError),
}

impl EditError {
	pub fn status(&self) -> StatusCode {
		match self {
			EditError::Validation(_) | EditError::BadRequest(_) => StatusCode::BAD_REQUEST,
			EditError::Forbidden(_) => StatusCode::FORBIDDEN,
			EditError::NotFound(_) => StatusCode::NOT_FOUND,
			EditError::Settings(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<EditError> for Response<String> {
	fn from(error: EditError) -> Self {
		let mut response = Response::new(error.to_string());
		*response.status_mut() = error.status();
		response.headers_mut().insert(
			CONTENT_TYPE,
			HeaderValue::from_static("text/plain; charset=utf-8"),
		);
		response
	}
}

/// Result type for editing operations.
pub type Result<T> = std::result::Result<T, EditError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(EditError::BadRequest("form".into()), StatusCode::BAD_REQUEST)]
	#[case(EditError::Forbidden("module-2".into()), StatusCode::FORBIDDEN)]
	#[case(EditError::NotFound("module-7".into()), StatusCode::NOT_FOUND)]
	#[case(
		EditError::Validation(ValidationError::MissingField("save_url")),
		StatusCode::BAD_REQUEST
	)]
	fn test_status_mapping(#[case] error: EditError, #[case] expected: StatusCode) {
		assert_eq!(error.status(), expected);
	}

	#[test]
	fn test_into_response_is_plain_text() {
		let response: Response<String> = EditError::NotFound("module-7".into()).into();
		assert_eq!(response.status(), StatusCode::NOT_FOUND);
		assert_eq!(response.body(), "Not found: module-7");
		assert_eq!(
			response.headers().get(CONTENT_TYPE).unwrap(),
			"text/plain; charset=utf-8"
		);
	}
}
