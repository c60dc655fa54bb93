//! URL scheme allow-listing for link and image targets.

use crate::error::{Result, ValidationError};

/// Schemes accepted for `href` and non-data `src` values.
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

const RELATIVE_PREFIXES: &[&str] = &["#", "/", "./", "../", "?"];

/// Browsers drop ASCII whitespace and control characters while parsing a
/// scheme, so `java\tscript:` must be judged as `javascript:`.
fn normalize(url: &str) -> String {
	url.chars()
		.filter(|c| !c.is_ascii_whitespace() && !c.is_control())
		.collect::<String>()
		.to_ascii_lowercase()
}

/// Returns the scheme of a normalized URL, or `None` for relative forms.
fn scheme_of(normalized: &str) -> Option<&str> {
	if RELATIVE_PREFIXES
		.iter()
		.any(|prefix| normalized.starts_with(prefix))
	{
		return None;
	}
	let colon = normalized.find(':')?;
	// A path, query or fragment delimiter before the colon makes it relative.
	if normalized[..colon].contains(['/', '?', '#']) {
		return None;
	}
	Some(&normalized[..colon])
}

fn reject(scheme: &str, url: &str) -> ValidationError {
	let scheme = if scheme.is_empty() { "(empty)" } else { scheme };
	tracing::warn!(scheme, url_len = url.len(), "rejected url with disallowed scheme");
	ValidationError::DisallowedUrlScheme {
		scheme: scheme.to_string(),
	}
}

/// Validates a link target against the scheme allow-list.
///
/// Accepts the empty string, relative forms (`#..`, `/..`, `//..`, `./..`,
/// `../..`, `?..`, bare paths) and the schemes in [`ALLOWED_SCHEMES`].
/// Returns the trimmed input.
///
/// # Examples
///
/// ```
/// use simplypages_core::security::validate_url;
///
/// assert_eq!(validate_url("https://example.com").unwrap(), "https://example.com");
/// assert_eq!(validate_url("../up").unwrap(), "../up");
/// assert!(validate_url("javascript:alert(1)").is_err());
/// assert!(validate_url("JaVa\tScRiPt:alert(1)").is_err());
/// ```
pub fn validate_url(url: &str) -> Result<String> {
	let trimmed = url.trim();
	let normalized = normalize(trimmed);
	match scheme_of(&normalized) {
		None => Ok(trimmed.to_string()),
		Some(scheme) if ALLOWED_SCHEMES.contains(&scheme) => Ok(trimmed.to_string()),
		Some(scheme) => Err(reject(scheme, trimmed)),
	}
}

/// Validates an image source.
///
/// Applies the same rules as [`validate_url`] and additionally accepts
/// `data:image/<subtype>` URIs. SVG data URIs are rejected because they
/// can embed script.
///
/// # Examples
///
/// ```
/// use simplypages_core::security::validate_image_src;
///
/// assert!(validate_image_src("data:image/png;base64,iVBORw0KGgo=").is_ok());
/// assert!(validate_image_src("data:image/svg+xml,<svg/>").is_err());
/// assert!(validate_image_src("data:text/html,<script>").is_err());
/// ```
pub fn validate_image_src(url: &str) -> Result<String> {
	let trimmed = url.trim();
	let normalized = normalize(trimmed);
	if let Some(rest) = normalized.strip_prefix("data:") {
		let mime = rest.split([';', ',']).next().unwrap_or_default();
		return match mime.strip_prefix("image/") {
			Some(subtype) if !subtype.is_empty() && subtype != "svg+xml" => {
				Ok(trimmed.to_string())
			}
			_ => Err(reject("data", trimmed)),
		};
	}
	validate_url(trimmed)
}

/// Returns `true` when [`validate_url`] would accept the value.
pub fn is_safe_url(url: &str) -> bool {
	let normalized = normalize(url.trim());
	match scheme_of(&normalized) {
		None => true,
		Some(scheme) => ALLOWED_SCHEMES.contains(&scheme),
	}
}
