//! Markdown rendering behind the escaping boundary.
//!
//! Conversion is delegated to `pulldown-cmark`. Its event stream is filtered
//! before HTML generation:
//!
//! - raw HTML (block or inline) is re-emitted as text, so it is escaped
//! - link destinations that fail [`validate_url`] become `#`
//! - images whose source fails [`validate_image_src`] are reduced to their
//!   alt text
//!
//! Parser options are process-wide and read-only after the first render.

use std::borrow::Cow;
use std::sync::OnceLock;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

use crate::context::RenderContext;
use crate::node::{IntoNode, Node, Render};
use crate::security::{validate_image_src, validate_url};

/// Parser options shared by every markdown render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownConfig {
	pub tables: bool,
	pub strikethrough: bool,
	pub tasklists: bool,
}

impl Default for MarkdownConfig {
	fn default() -> Self {
		Self {
			tables: true,
			strikethrough: true,
			tasklists: false,
		}
	}
}

static MARKDOWN_CONFIG: OnceLock<MarkdownConfig> = OnceLock::new();

impl MarkdownConfig {
	/// Installs the process-wide configuration.
	///
	/// Returns `false` if a configuration was already installed (explicitly
	/// or by a render that ran first); the existing one is kept.
	pub fn install(config: MarkdownConfig) -> bool {
		let installed = MARKDOWN_CONFIG.set(config).is_ok();
		if !installed {
			tracing::warn!("markdown configuration already initialised; ignoring");
		}
		installed
	}

	/// Returns the active configuration, initialising the default if needed.
	pub fn global() -> &'static MarkdownConfig {
		MARKDOWN_CONFIG.get_or_init(MarkdownConfig::default)
	}

	fn options(&self) -> Options {
		let mut opts = Options::empty();
		if self.tables {
			opts.insert(Options::ENABLE_TABLES);
		}
		if self.strikethrough {
			opts.insert(Options::ENABLE_STRIKETHROUGH);
		}
		if self.tasklists {
			opts.insert(Options::ENABLE_TASKLISTS);
		}
		opts
	}
}

/// Markdown source rendered to sanitized HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markdown {
	source: String,
	sandboxed: bool,
}

impl Markdown {
	/// Creates a sandboxed markdown block.
	pub fn new(source: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			sandboxed: true,
		}
	}

	/// Creates a markdown block that passes raw HTML and URLs through.
	///
	/// Only for operator-authored content; never for request input.
	pub fn unsafe_html(source: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			sandboxed: false,
		}
	}

	pub fn source(&self) -> &str {
		&self.source
	}

	/// Converts the source to HTML without the wrapper element.
	///
	/// # Examples
	///
	/// ```
	/// use simplypages_core::Markdown;
	///
	/// let html = Markdown::new("**bold** <script>alert(1)</script>").to_html();
	/// assert!(html.contains("<strong>bold</strong>"));
	/// assert!(!html.contains("<script>"));
	/// ```
	pub fn to_html(&self) -> String {
		let options = MarkdownConfig::global().options();
		let parser = Parser::new_ext(&self.source, options);
		let mut output = String::with_capacity(self.source.len() * 3 / 2);
		if self.sandboxed {
			html::push_html(&mut output, sandbox(parser));
		} else {
			html::push_html(&mut output, parser);
		}
		output
	}
}

fn sandbox<'a>(parser: Parser<'a, 'a>) -> impl Iterator<Item = Event<'a>> {
	let mut in_rejected_image = false;
	parser.filter_map(move |event| match event {
		Event::Html(raw) => Some(Event::Text(raw)),
		Event::Start(Tag::Link(link_type, dest, title)) => {
			let dest = if validate_url(&dest).is_ok() {
				dest
			} else {
				CowStr::Borrowed("#")
			};
			Some(Event::Start(Tag::Link(link_type, dest, title)))
		}
		Event::Start(Tag::Image(link_type, dest, title)) => {
			if validate_image_src(&dest).is_ok() {
				Some(Event::Start(Tag::Image(link_type, dest, title)))
			} else {
				in_rejected_image = true;
				None
			}
		}
		Event::End(Tag::Image(..)) if in_rejected_image => {
			in_rejected_image = false;
			None
		}
		other => Some(other),
	})
}

impl Render for Markdown {
	fn render_into(&self, _ctx: &RenderContext, output: &mut String) {
		output.push_str("<div class=\"markdown-content\">");
		output.push_str(&self.to_html());
		output.push_str("</div>");
	}
}

impl IntoNode for Markdown {
	fn into_node(self) -> Node {
		Node::trusted_raw(Cow::Owned(self.render(&RenderContext::empty())))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn test_basic_formatting() {
		let html = Markdown::new("# Title\n\nSome *text*.").to_html();
		assert_eq!(html, "<h1>Title</h1>\n<p>Some <em>text</em>.</p>\n");
	}

	#[rstest]
	#[case("<script>alert(1)</script>")]
	#[case("<img src=x onerror=alert(1)>")]
	#[case("text <span onclick=\"alert(1)\">inline</span>")]
	#[case("<iframe src=\"https://evil.example\"></iframe>")]
	fn test_raw_html_is_escaped(#[case] source: &str) {
		let html = Markdown::new(source).to_html();
		assert!(!html.contains("<script"), "{html}");
		assert!(!html.contains("<img"), "{html}");
		assert!(!html.contains("<span"), "{html}");
		assert!(!html.contains("<iframe"), "{html}");
	}

	#[rstest]
	#[case("[x](javascript:alert(1))")]
	#[case("[x](JAVASCRIPT:alert(1))")]
	#[case("[x](data:text/html,boom)")]
	#[case("[x](vbscript:msgbox)")]
	#[case("<javascript:alert(1)>")]
	fn test_dangerous_links_neutralised(#[case] source: &str) {
		let html = Markdown::new(source).to_html().to_lowercase();
		assert!(html.contains(r##"href="#""##), "{html}");
		assert!(!html.contains(r#"href="javascript"#), "{html}");
		assert!(!html.contains(r#"href="data"#), "{html}");
		assert!(!html.contains(r#"href="vbscript"#), "{html}");
	}

	#[test]
	fn test_safe_links_kept() {
		let html = Markdown::new("[docs](https://example.com/docs)").to_html();
		assert!(html.contains(r#"<a href="https://example.com/docs">docs</a>"#));
	}

	#[test]
	fn test_rejected_image_keeps_alt_text() {
		let html = Markdown::new("![cat](javascript:alert(1))").to_html();
		assert!(!html.contains("<img"));
		assert!(html.contains("cat"));
	}

	#[test]
	fn test_data_image_allowed() {
		let html = Markdown::new("![dot](data:image/png;base64,AAAA)").to_html();
		assert!(html.contains(r#"<img src="data:image/png;base64,AAAA" alt="dot" />"#));
	}

	#[test]
	fn test_unsafe_html_passes_through() {
		let html = Markdown::unsafe_html("<mark>hi</mark>").to_html();
		assert!(html.contains("<mark>hi</mark>"));
	}

	#[test]
	fn test_into_node_wraps_output() {
		let node = Markdown::new("hello").into_node();
		assert_eq!(
			node.render_to_string(),
			"<div class=\"markdown-content\"><p>hello</p>\n</div>"
		);
	}
}
