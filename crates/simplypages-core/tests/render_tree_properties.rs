//! Render tree and escaping boundary integration tests
//!
//! Test Categories:
//! - Property-based: escaping, determinism, URL allow-list, CSS grammar
//! - Snapshot: byte-stable output of a composed tree
//! - Edge Cases: class merging across repeated configuration

use proptest::prelude::*;
use rstest::*;
use simplypages_core::security::escape_attr;
use simplypages_core::security::url::ALLOWED_SCHEMES;
use simplypages_core::{IntoNode, Markdown, Node, RenderContext, Surround, ValidationError};

// ============================================================================
// Property-based Tests
// ============================================================================

/// Text containing markup characters never reaches output unescaped
#[rstest]
fn test_property_text_is_never_emitted_raw() {
	proptest!(|(text in ".*[<>&\"'].*")| {
		let node = Node::element("p").text(text.clone()).build().unwrap();
		let html = node.render_to_string();

		let inner = html
			.strip_prefix("<p>")
			.and_then(|rest| rest.strip_suffix("</p>"))
			.unwrap();
		prop_assert!(!inner.contains('<'));
		prop_assert!(!inner.contains('>'));
		prop_assert!(!inner.contains('"'));
		prop_assert!(!inner.contains('\''));
	});
}

/// Attribute values cannot break out of their quotes
#[rstest]
fn test_property_attribute_values_stay_quoted() {
	proptest!(|(value in ".*")| {
		let node = Node::element("div").attr("title", value).build().unwrap();
		let html = node.render_to_string();
		// Exactly the two delimiting quotes, or none when the value is empty.
		let quotes = html.matches('"').count();
		prop_assert!(quotes == 2 || quotes == 0);
	});
}

/// Rendering the same tree twice is byte-identical
#[rstest]
fn test_property_render_is_deterministic() {
	proptest!(|(items in proptest::collection::vec("[a-zA-Z0-9 <>&]{0,12}", 0..6), classes in "[a-z]{1,5}( [a-z]{1,5}){0,3}")| {
		let node = Node::element("ul")
			.class(&classes)
			.class(&classes)
			.children(items.iter().map(|item| {
				Node::element("li").class("list-group-item").text(item.clone()).build().unwrap()
			}).collect::<Vec<_>>())
			.child_stream(Surround::prepend(vec![Node::text("head")]))
			.build()
			.unwrap();
		let ctx = RenderContext::empty();
		prop_assert_eq!(node.render(&ctx), node.render(&ctx));
	});
}

/// Allowed schemes and relative forms are accepted and rendered as the encoded input
#[rstest]
fn test_property_allowed_urls_round_trip_to_href() {
	let prefixes = prop_oneof![
		Just("http://".to_string()),
		Just("https://".to_string()),
		Just("mailto:".to_string()),
		Just("tel:".to_string()),
		Just("#".to_string()),
		Just("/".to_string()),
		Just("./".to_string()),
		Just("../".to_string()),
		Just("?".to_string()),
		Just("//".to_string()),
	];
	proptest!(|(prefix in prefixes, rest in "[a-zA-Z0-9/._?=&%-]{0,24}")| {
		let url = format!("{prefix}{rest}");
		let node = Node::element("a").href(url.clone()).build().unwrap();
		let expected = format!("<a href=\"{}\"></a>", escape_attr(&url));
		prop_assert_eq!(node.render_to_string(), expected);
	});
}

/// Any other scheme is rejected at construction
#[rstest]
fn test_property_disallowed_schemes_rejected() {
	proptest!(|(scheme in "[a-z][a-z0-9+.-]{0,10}", rest in "[a-zA-Z0-9/._-]{0,16}")| {
		prop_assume!(!ALLOWED_SCHEMES.contains(&scheme.as_str()));
		let url = format!("{scheme}:{rest}");
		let result = Node::element("a").href(url).build();
		let is_disallowed = matches!(result, Err(ValidationError::DisallowedUrlScheme { .. }));
		prop_assert!(is_disallowed);
	});
}

/// Grammar-conforming lengths are accepted unchanged
#[rstest]
fn test_property_css_lengths_accepted_unchanged() {
	proptest!(|(value in "[0-9]{1,4}(\\.[0-9]{1,2})?(px|%|em|rem|vw|vh)")| {
		let node = Node::element("div").width(&value).build().unwrap();
		prop_assert_eq!(
			node.render_to_string(),
			format!("<div style=\"width: {value};\"></div>")
		);
	});
}

/// Values containing a semicolon are always rejected
#[rstest]
fn test_property_css_with_semicolon_rejected() {
	proptest!(|(before in "[0-9a-z%. ]{0,8}", after in "[0-9a-z%:. ]{0,8}")| {
		let value = format!("{before};{after}");
		let result = Node::element("div").max_width(&value).build();
		let is_invalid_css = matches!(result, Err(ValidationError::InvalidCssValue { .. }));
		prop_assert!(is_invalid_css);
	});
}

// ============================================================================
// Snapshot Tests
// ============================================================================

#[rstest]
fn test_snapshot_composed_card() {
	let card = Node::element("div")
		.class("card")
		.id("card-1")
		.attr("data-kind", "note")
		.class("shadow card")
		.child(Node::element("h3").class("card-title").text("Q&A").build().unwrap())
		.child(Node::element("input").attr("type", "checkbox").bool_attr("checked", true).build().unwrap())
		.child(Node::element("a").href("/docs?a=1&b=2").text("docs").build().unwrap())
		.build()
		.unwrap();

	insta::assert_snapshot!(
		card.render_to_string(),
		@r#"<div class="card shadow" id="card-1" data-kind="note"><h3 class="card-title">Q&amp;A</h3><input type="checkbox" checked /><a href="/docs?a=1&amp;b=2">docs</a></div>"#
	);
}

#[rstest]
fn test_markdown_sandbox_output() {
	let node = Markdown::new("Hi <b onclick=\"x()\">there</b> [go](javascript:void(0))").into_node();
	assert_eq!(
		node.render_to_string(),
		"<div class=\"markdown-content\"><p>Hi &lt;b onclick=&quot;x()&quot;&gt;there&lt;/b&gt; <a href=\"#\">go</a></p>\n</div>"
	);
}

// ============================================================================
// Edge Cases
// ============================================================================

/// No duplicate class tokens after repeated configuration
#[rstest]
#[case(1)]
#[case(3)]
#[case(10)]
fn test_no_duplicate_class_tokens(#[case] repeats: usize) {
	let mut builder = Node::element("div").class("module");
	for _ in 0..repeats {
		builder = builder
			.attr("class", "module simple-list-module")
			.class("simple-list-module");
	}
	let node = builder.build().unwrap();
	let element = node.as_element().unwrap();
	let tokens: Vec<_> = element.attributes().classes().iter().collect();
	assert_eq!(tokens, vec!["module", "simple-list-module"]);
}
