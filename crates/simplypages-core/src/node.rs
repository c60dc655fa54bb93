//! Render tree nodes.
//!
//! A [`Node`] is the atomic unit of output. Leaves are text (always
//! escaped) or trusted raw markup; containers are [`Element`]s holding a tag,
//! an [`AttributeSet`] and ordered children.
//!
//! Elements are configured through an [`ElementBuilder`]. Setters that need
//! validation (ids, URLs, style values) record the first failure, and the
//! terminal [`ElementBuilder::build`] returns it, so an invalid element is
//! never produced.
//!
//! ## Example
//!
//! ```
//! use simplypages_core::{Node, RenderContext};
//!
//! let node = Node::element("div")
//! 	.class("card")
//! 	.id("card-1")
//! 	.child(Node::element("h2").text("Title").build()?)
//! 	.text("<b>escaped</b>")
//! 	.build()?;
//!
//! assert_eq!(
//! 	node.render(&RenderContext::empty()),
//! 	r#"<div class="card" id="card-1"><h2>Title</h2>&lt;b&gt;escaped&lt;/b&gt;</div>"#
//! );
//! # Ok::<(), simplypages_core::ValidationError>(())
//! ```

pub mod stream;

pub use stream::{ChildStream, Surround};

use std::borrow::Cow;
use std::sync::Arc;

use crate::attributes::AttributeSet;
use crate::context::RenderContext;
use crate::error::{Result, ValidationError};
use crate::security::{escape_text, validate_css_length};

const VOID_TAGS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

/// Something that writes markup for a given context.
pub trait Render {
	/// Appends the markup for `self` to `output`.
	fn render_into(&self, ctx: &RenderContext, output: &mut String);

	/// Renders to a new string.
	fn render(&self, ctx: &RenderContext) -> String {
		let mut output = String::new();
		self.render_into(ctx, &mut output);
		output
	}
}

/// A node of the render tree.
#[derive(Debug, Clone, Default)]
pub enum Node {
	/// Text that is escaped on output.
	Text(Cow<'static, str>),
	/// Markup emitted verbatim. Only produced by [`Node::trusted_raw`].
	Raw(Cow<'static, str>),
	/// A tag with attributes and children.
	Element(Element),
	/// Several nodes rendered in sequence without a wrapper.
	Fragment(Vec<Node>),
	/// Renders nothing.
	#[default]
	Empty,
}

impl Node {
	/// Starts building an element.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> ElementBuilder {
		ElementBuilder::new(tag)
	}

	/// Creates a text leaf.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a raw markup leaf.
	///
	/// The content is written without escaping. Use it only for markup
	/// generated by this library (sanitized markdown, pre-rendered fragments),
	/// never for request input.
	pub fn trusted_raw(markup: impl Into<Cow<'static, str>>) -> Self {
		Self::Raw(markup.into())
	}

	/// Creates a fragment.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoNode>) -> Self {
		Self::Fragment(children.into_iter().map(IntoNode::into_node).collect())
	}

	pub fn empty() -> Self {
		Self::Empty
	}

	/// Returns `true` if the node renders nothing.
	pub fn is_empty(&self) -> bool {
		match self {
			Node::Empty => true,
			Node::Text(text) | Node::Raw(text) => text.is_empty(),
			Node::Fragment(children) => children.iter().all(Node::is_empty),
			Node::Element(_) => false,
		}
	}

	/// Returns the element if this node is one.
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Node::Element(el) => Some(el),
			_ => None,
		}
	}

	/// Renders with an empty context.
	pub fn render_to_string(&self) -> String {
		self.render(&RenderContext::empty())
	}

	/// Renders with the given context.
	pub fn render(&self, ctx: &RenderContext) -> String {
		Render::render(self, ctx)
	}
}

impl Render for Node {
	fn render_into(&self, ctx: &RenderContext, output: &mut String) {
		match self {
			Node::Text(text) => output.push_str(&escape_text(text)),
			Node::Raw(markup) => output.push_str(markup),
			Node::Element(el) => el.render_into(ctx, output),
			Node::Fragment(children) => {
				for child in children {
					child.render_into(ctx, output);
				}
			}
			Node::Empty => {}
		}
	}
}

/// A container node. Immutable once built.
#[derive(Debug, Clone)]
pub struct Element {
	tag: Cow<'static, str>,
	attrs: AttributeSet,
	children: Vec<Node>,
	is_void: bool,
	stream: Option<Arc<dyn ChildStream>>,
}

impl Element {
	/// Starts building an element.
	pub fn builder(tag: impl Into<Cow<'static, str>>) -> ElementBuilder {
		ElementBuilder::new(tag)
	}

	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	pub fn attributes(&self) -> &AttributeSet {
		&self.attrs
	}

	/// Returns the declared children, without any synthetic ones.
	pub fn declared_children(&self) -> &[Node] {
		&self.children
	}

	/// Returns the children in render order, including those produced by a
	/// [`ChildStream`].
	pub fn effective_children(&self) -> Box<dyn Iterator<Item = &Node> + '_> {
		match &self.stream {
			Some(stream) => stream.stream(&self.children),
			None => Box::new(self.children.iter()),
		}
	}

	/// Returns whether this is a void element (no closing tag).
	pub fn is_void(&self) -> bool {
		self.is_void
	}

	/// Reopens the element for further configuration.
	///
	/// The returned builder owns a copy; `self` is unchanged.
	pub fn to_builder(&self) -> ElementBuilder {
		ElementBuilder {
			tag: self.tag.clone(),
			attrs: self.attrs.clone(),
			children: self.children.clone(),
			is_void: self.is_void,
			stream: self.stream.clone(),
			error: None,
		}
	}
}

impl Render for Element {
	fn render_into(&self, ctx: &RenderContext, output: &mut String) {
		output.push('<');
		output.push_str(&self.tag);
		self.attrs.render_into(output);

		if self.is_void {
			output.push_str(" />");
			return;
		}

		output.push('>');
		if ctx.within_depth_limit() {
			let child_ctx = ctx.descend();
			for child in self.effective_children() {
				child.render_into(&child_ctx, output);
			}
		} else {
			tracing::warn!(tag = %self.tag, depth = ctx.depth(), "render depth limit reached");
		}
		output.push_str("</");
		output.push_str(&self.tag);
		output.push('>');
	}
}

fn validate_tag(tag: &str) -> Result<()> {
	let mut chars = tag.chars();
	let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '-');
	if valid {
		Ok(())
	} else {
		Err(ValidationError::Unsupported(format!("invalid tag name '{tag}'")))
	}
}

/// Chained configuration for an [`Element`].
#[derive(Debug)]
#[must_use = "an element builder does nothing until `build` is called"]
pub struct ElementBuilder {
	tag: Cow<'static, str>,
	attrs: AttributeSet,
	children: Vec<Node>,
	is_void: bool,
	stream: Option<Arc<dyn ChildStream>>,
	error: Option<ValidationError>,
}

impl ElementBuilder {
	/// Creates a builder for `tag`. Void tags are detected automatically.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = VOID_TAGS.contains(&tag.to_ascii_lowercase().as_str());
		let error = validate_tag(&tag).err();
		Self {
			tag,
			attrs: AttributeSet::new(),
			children: Vec::new(),
			is_void,
			stream: None,
			error,
		}
	}

	fn record(&mut self, result: Result<()>) {
		if let Err(err) = result {
			self.error.get_or_insert(err);
		}
	}

	/// Sets an attribute. See [`AttributeSet::set`] for merge rules.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		let result = self.attrs.set(name, value);
		self.record(result);
		self
	}

	/// Sets an attribute only when `value` is `Some`.
	pub fn attr_opt(
		self,
		name: impl Into<Cow<'static, str>>,
		value: Option<impl Into<Cow<'static, str>>>,
	) -> Self {
		match value {
			Some(value) => self.attr(name, value),
			None => self,
		}
	}

	/// Adds a boolean attribute when `enabled` is true.
	pub fn bool_attr(self, name: impl Into<Cow<'static, str>>, enabled: bool) -> Self {
		if enabled { self.attr(name, "") } else { self }
	}

	/// Adds one or more whitespace-separated class tokens.
	pub fn class(mut self, tokens: &str) -> Self {
		self.attrs.add_class(tokens);
		self
	}

	/// Sets the `id` attribute after DOM-id validation.
	pub fn id(self, id: impl Into<String>) -> Self {
		self.attr("id", id.into())
	}

	/// Sets a validated link target.
	pub fn href(self, url: impl Into<Cow<'static, str>>) -> Self {
		self.attr("href", url)
	}

	/// Sets a validated image source.
	pub fn src(self, url: impl Into<Cow<'static, str>>) -> Self {
		self.attr("src", url)
	}

	/// Sets a validated inline style declaration.
	pub fn style(mut self, property: &str, value: &str) -> Self {
		let result = self.attrs.set_style(property, value);
		self.record(result);
		self
	}

	fn dimension(mut self, property: &'static str, value: &str) -> Self {
		match validate_css_length(property, value) {
			Ok(()) => self.attrs.set_checked_style(property, value),
			Err(err) => self.record(Err(err)),
		}
		self
	}

	/// Sets `width` from a CSS length.
	pub fn width(self, value: &str) -> Self {
		self.dimension("width", value)
	}

	/// Sets `max-width` from a CSS length.
	pub fn max_width(self, value: &str) -> Self {
		self.dimension("max-width", value)
	}

	/// Sets `min-width` from a CSS length.
	pub fn min_width(self, value: &str) -> Self {
		self.dimension("min-width", value)
	}

	/// Appends a child.
	pub fn child(mut self, child: impl IntoNode) -> Self {
		if self.is_void {
			let err = ValidationError::Unsupported(format!("<{}> cannot have children", self.tag));
			self.record(Err(err));
			return self;
		}
		self.children.push(child.into_node());
		self
	}

	/// Appends a child produced by a fallible constructor.
	pub fn try_child<N: IntoNode>(mut self, child: Result<N>) -> Self {
		match child {
			Ok(child) => self.child(child),
			Err(err) => {
				self.record(Err(err));
				self
			}
		}
	}

	/// Appends a text child.
	pub fn text(self, content: impl Into<Cow<'static, str>>) -> Self {
		self.child(Node::text(content))
	}

	/// Appends several children.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoNode>) -> Self {
		for child in children {
			self = self.child(child);
		}
		self
	}

	/// Installs a child stream that wraps the declared children at render time.
	pub fn child_stream(mut self, stream: impl ChildStream + 'static) -> Self {
		if self.is_void {
			let err = ValidationError::Unsupported(format!("<{}> cannot have children", self.tag));
			self.record(Err(err));
			return self;
		}
		self.stream = Some(Arc::new(stream));
		self
	}

	/// Returns `true` if a setter has already failed.
	pub fn has_error(&self) -> bool {
		self.error.is_some()
	}

	/// Finishes configuration and returns the element.
	pub fn build_element(self) -> Result<Element> {
		if let Some(err) = self.error {
			tracing::debug!(tag = %self.tag, error = %err, "element construction rejected");
			return Err(err);
		}
		Ok(Element {
			tag: self.tag,
			attrs: self.attrs,
			children: self.children,
			is_void: self.is_void,
			stream: self.stream,
		})
	}

	/// Finishes configuration and returns the element as a [`Node`].
	pub fn build(self) -> Result<Node> {
		self.build_element().map(Node::Element)
	}
}

/// Conversion into a [`Node`].
pub trait IntoNode {
	fn into_node(self) -> Node;
}

impl IntoNode for Node {
	fn into_node(self) -> Node {
		self
	}
}

impl IntoNode for Element {
	fn into_node(self) -> Node {
		Node::Element(self)
	}
}

impl IntoNode for String {
	fn into_node(self) -> Node {
		Node::Text(Cow::Owned(self))
	}
}

impl IntoNode for &String {
	fn into_node(self) -> Node {
		Node::Text(Cow::Owned(self.clone()))
	}
}

impl IntoNode for &'static str {
	fn into_node(self) -> Node {
		Node::Text(Cow::Borrowed(self))
	}
}

impl<T: IntoNode> IntoNode for Option<T> {
	fn into_node(self) -> Node {
		match self {
			Some(v) => v.into_node(),
			None => Node::Empty,
		}
	}
}

impl<T: IntoNode> IntoNode for Vec<T> {
	fn into_node(self) -> Node {
		Node::Fragment(self.into_iter().map(IntoNode::into_node).collect())
	}
}

impl IntoNode for () {
	fn into_node(self) -> Node {
		Node::Empty
	}
}

impl<A: IntoNode, B: IntoNode> IntoNode for (A, B) {
	fn into_node(self) -> Node {
		Node::Fragment(vec![self.0.into_node(), self.1.into_node()])
	}
}

impl<A: IntoNode, B: IntoNode, C: IntoNode> IntoNode for (A, B, C) {
	fn into_node(self) -> Node {
		Node::Fragment(vec![
			self.0.into_node(),
			self.1.into_node(),
			self.2.into_node(),
		])
	}
}

impl<A: IntoNode, B: IntoNode, C: IntoNode, D: IntoNode> IntoNode for (A, B, C, D) {
	fn into_node(self) -> Node {
		Node::Fragment(vec![
			self.0.into_node(),
			self.1.into_node(),
			self.2.into_node(),
			self.3.into_node(),
		])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_simple_element() {
		let node = Node::element("div").build().unwrap();
		assert_eq!(node.render_to_string(), "<div></div>");
	}

	#[test]
	fn test_void_element_detection() {
		assert!(Element::builder("br").build_element().unwrap().is_void());
		assert!(Element::builder("img").build_element().unwrap().is_void());
		assert!(Element::builder("input").build_element().unwrap().is_void());
		assert!(!Element::builder("div").build_element().unwrap().is_void());
	}

	#[test]
	fn test_void_detection_ignores_case() {
		let node = Node::element("IMG").attr("src", "/logo.png").build().unwrap();
		assert_eq!(node.render_to_string(), r#"<IMG src="/logo.png" />"#);
		assert!(Node::element("Br").text("x").build().is_err());
	}

	#[test]
	fn test_render_void_element() {
		let node = Node::element("input")
			.attr("type", "text")
			.attr("name", "title")
			.build()
			.unwrap();
		assert_eq!(
			node.render_to_string(),
			r#"<input type="text" name="title" />"#
		);
	}

	#[test]
	fn test_void_element_rejects_children() {
		let result = Node::element("br").text("x").build();
		assert!(matches!(result, Err(ValidationError::Unsupported(_))));
	}

	#[test]
	fn test_text_is_escaped() {
		let node = Node::element("p")
			.text("<script>alert('xss')</script>")
			.build()
			.unwrap();
		assert_eq!(
			node.render_to_string(),
			"<p>&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;</p>"
		);
	}

	#[test]
	fn test_raw_is_verbatim() {
		let node = Node::trusted_raw("<hr />");
		assert_eq!(node.render_to_string(), "<hr />");
	}

	#[test]
	fn test_fragment_renders_in_order() {
		let node = Node::fragment(vec!["a", "b", "c"]);
		assert_eq!(node.render_to_string(), "abc");
	}

	#[test]
	fn test_tuple_into_node() {
		let node = ("Hello", " ", "World").into_node();
		assert_eq!(node.render_to_string(), "Hello World");
	}

	#[test]
	fn test_option_into_node() {
		let none: Option<&'static str> = None;
		assert!(none.into_node().is_empty());
		assert_eq!(Some("x").into_node().render_to_string(), "x");
	}

	#[test]
	fn test_first_error_wins() {
		let result = Node::element("a")
			.id("bad id")
			.href("javascript:alert(1)")
			.build();
		assert!(matches!(result, Err(ValidationError::InvalidId { .. })));
	}

	#[test]
	fn test_invalid_tag_rejected() {
		assert!(Node::element("di v").build().is_err());
		assert!(Node::element("<script>").build().is_err());
	}

	#[test]
	fn test_dimension_setters() {
		let node = Node::element("div")
			.width("100px")
			.max_width("50%")
			.min_width("auto")
			.build()
			.unwrap();
		assert_eq!(
			node.render_to_string(),
			r#"<div style="width: 100px; max-width: 50%; min-width: auto;"></div>"#
		);
	}

	#[test]
	fn test_dimension_injection_rejected() {
		let result = Node::element("div").width("1px;position:fixed").build();
		assert!(matches!(
			result,
			Err(ValidationError::InvalidCssValue { .. })
		));
	}

	#[test]
	fn test_child_stream_prepends_without_mutating() {
		let el = Element::builder("nav")
			.child("links")
			.child_stream(Surround::prepend(vec![Node::text("brand")]))
			.build_element()
			.unwrap();
		assert_eq!(el.declared_children().len(), 1);
		assert_eq!(
			Node::Element(el).render_to_string(),
			"<nav>brandlinks</nav>"
		);
	}

	#[test]
	fn test_to_builder_leaves_original() {
		let el = Element::builder("div").class("a").build_element().unwrap();
		let extended = el.to_builder().class("b").build_element().unwrap();
		assert_eq!(Node::Element(el).render_to_string(), r#"<div class="a"></div>"#);
		assert_eq!(
			Node::Element(extended).render_to_string(),
			r#"<div class="a b"></div>"#
		);
	}

	#[test]
	fn test_repeated_class_configuration_has_no_duplicates() {
		let mut builder = Node::element("div");
		for _ in 0..5 {
			builder = builder.class("module").class("module content-module");
		}
		let html = builder.build().unwrap().render_to_string();
		assert_eq!(html, r#"<div class="module content-module"></div>"#);
	}

	#[test]
	fn test_depth_limit_omits_deep_children() {
		let node = Node::element("div")
			.child(Node::element("div").text("deep").build().unwrap())
			.text("shallow")
			.build()
			.unwrap();
		let ctx = RenderContext::empty().with(&crate::context::MAX_DEPTH, 1);
		assert_eq!(node.render(&ctx), "<div><div></div>shallow</div>");
		assert_eq!(node.render_to_string(), "<div><div>deep</div>shallow</div>");
	}

	#[test]
	fn test_render_is_deterministic() {
		let node = Node::element("ul")
			.class("list-group")
			.children(vec!["a", "b"])
			.build()
			.unwrap();
		let ctx = RenderContext::empty().descend();
		assert_eq!(node.render(&ctx), node.render(&ctx));
		assert_eq!(node.render(&ctx), node.render_to_string());
	}
}
