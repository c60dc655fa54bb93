//! Text and attribute-value encoding.

use std::borrow::Cow;

/// Escapes a string for insertion into an element body.
///
/// Replaces `&`, `<`, `>`, `"` and `'`. Returns a borrowed reference when
/// nothing needs escaping.
///
/// # Examples
///
/// ```
/// use simplypages_core::security::escape_text;
///
/// assert_eq!(
/// 	escape_text("<script>alert('xss')</script>"),
/// 	"&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;"
/// );
/// assert_eq!(escape_text("plain"), "plain");
/// ```
pub fn escape_text(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

/// Escapes a string for use inside a double-quoted attribute value.
///
/// Encodes the same characters as [`escape_text`] plus line breaks, so a
/// value can never terminate the attribute or smuggle a new one.
///
/// # Examples
///
/// ```
/// use simplypages_core::security::escape_attr;
///
/// let escaped = escape_attr(r#"x" onload="alert(1)""#);
/// assert_eq!(escaped, "x&quot; onload=&quot;alert(1)&quot;");
/// assert_eq!(escape_attr("a\nb"), "a&#10;b");
/// ```
pub fn escape_attr(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'', '\n', '\r']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				'\n' => escaped.push_str("&#10;"),
				'\r' => escaped.push_str("&#13;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

/// Percent-encodes a value for use as a single URL path segment or query value.
///
/// # Examples
///
/// ```
/// use simplypages_core::security::escape_url;
///
/// assert_eq!(escape_url("a b/c"), "a%20b%2Fc");
/// ```
pub fn escape_url(input: &str) -> Cow<'_, str> {
	urlencoding::encode(input)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("&", "&amp;")]
	#[case("<", "&lt;")]
	#[case(">", "&gt;")]
	#[case("\"", "&quot;")]
	#[case("'", "&#x27;")]
	#[case("Tom & Jerry", "Tom &amp; Jerry")]
	fn test_escape_text_characters(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(escape_text(input), expected);
	}

	#[test]
	fn test_escape_text_borrows_clean_input() {
		assert!(matches!(escape_text("hello world"), Cow::Borrowed(_)));
	}

	#[test]
	fn test_escape_attr_line_breaks() {
		assert_eq!(escape_attr("a\r\nb"), "a&#13;&#10;b");
	}

	#[test]
	fn test_escape_attr_quotes() {
		let escaped = escape_attr(r#"value" onload="alert('xss')"#);
		assert!(!escaped.contains('"'));
		assert!(!escaped.contains('\''));
	}

	#[test]
	fn test_escape_url_reserved() {
		assert_eq!(escape_url("item-0"), "item-0");
		assert!(escape_url("javascript:alert(1)").contains("%3A"));
	}
}
