//! Out-of-band response assembly
//!
//! A mutating request answers with one primary fragment followed by wrapped
//! side-channel fragments. Each wrapper is a `div` carrying the swap
//! directive and the target identity, so htmx can route it independently of
//! the request's own `hx-target`:
//!
//! ```text
//! <primary><div hx-swap-oob="true" id="edit-modal-container"></div><div hx-swap-oob="true" id="page-content">...</div>
//! ```
//!
//! Fragments are rendered with a fresh [`RenderContext`] in the order they
//! were added, so identical inputs always yield identical bytes.

use std::fmt;

use simplypages_conf::EditingSettings;
use simplypages_core::security::ClassToken;
use simplypages_core::{DomId, Node, RenderContext, Result};

/// How a fragment replaces the markup it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapDirective {
	/// `true`: replace the target element with the wrapper
	True,
	InnerHtml,
	OuterHtml,
	BeforeEnd,
	AfterBegin,
	Delete,
}

impl SwapDirective {
	pub fn as_str(&self) -> &'static str {
		match self {
			SwapDirective::True => "true",
			SwapDirective::InnerHtml => "innerHTML",
			SwapDirective::OuterHtml => "outerHTML",
			SwapDirective::BeforeEnd => "beforeend",
			SwapDirective::AfterBegin => "afterbegin",
			SwapDirective::Delete => "delete",
		}
	}
}

impl fmt::Display for SwapDirective {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Element a fragment is routed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapTarget {
	Id(DomId),
	Class(ClassToken),
}

impl SwapTarget {
	/// Validates `id` and targets the element carrying it.
	pub fn id(id: impl Into<String>) -> Result<Self> {
		Ok(SwapTarget::Id(DomId::new(id)?))
	}

	/// Validates `token` and targets the element carrying that class.
	pub fn class(token: impl Into<String>) -> Result<Self> {
		Ok(SwapTarget::Class(ClassToken::new(token)?))
	}

	pub fn selector(&self) -> String {
		match self {
			SwapTarget::Id(id) => id.selector(),
			SwapTarget::Class(class) => class.selector(),
		}
	}
}

#[derive(Debug, Clone)]
struct OobFragment {
	target: SwapTarget,
	swap: SwapDirective,
	content: Node,
}

impl OobFragment {
	fn wrap(&self) -> Result<Node> {
		// The content is serialized on its own so it never inherits the
		// wrapper's render state.
		let rendered = self.content.render(&RenderContext::empty());
		let wrapper = Node::element("div").attr("hx-swap-oob", self.swap.as_str());
		let wrapper = match &self.target {
			SwapTarget::Id(id) => wrapper.id(id.as_str()),
			SwapTarget::Class(class) => wrapper.class(class.as_str()),
		};
		wrapper.child(Node::trusted_raw(rendered)).build()
	}
}

/// Region refreshed by the second fragment of a mutation response.
#[derive(Debug, Clone)]
pub enum RefreshRegion {
	/// Replaces the page-content container (by id, swap `true`). The node is
	/// what goes inside it.
	PageContent(Node),
	/// Replaces the module container (by class, swap `outerHTML`). The node
	/// is what goes inside it.
	ModuleContainer(Node),
}

/// A primary fragment plus ordered out-of-band fragments.
///
/// # Examples
///
/// ```
/// use simplypages_conf::EditingSettings;
/// use simplypages_core::Node;
/// use simplypages_editing::{OobResponse, RefreshRegion};
///
/// let response = OobResponse::mutation(
/// 	&EditingSettings::default(),
/// 	RefreshRegion::PageContent(Node::text("fresh")),
/// )
/// .unwrap();
/// assert_eq!(response.fragment_count(), 2);
/// assert_eq!(
/// 	response.render().unwrap(),
/// 	"<div hx-swap-oob=\"true\" id=\"edit-modal-container\"></div><div hx-swap-oob=\"true\" id=\"page-content\">fresh</div>"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct OobResponse {
	primary: Node,
	fragments: Vec<OobFragment>,
}

impl OobResponse {
	pub fn new(primary: Node) -> Self {
		Self {
			primary,
			fragments: Vec::new(),
		}
	}

	/// Appends a fragment. Fragments render in insertion order.
	pub fn with_fragment(mut self, target: SwapTarget, swap: SwapDirective, content: Node) -> Self {
		self.fragments.push(OobFragment {
			target,
			swap,
			content,
		});
		self
	}

	/// Replaces the primary fragment.
	pub fn with_primary(mut self, primary: Node) -> Self {
		self.primary = primary;
		self
	}

	/// The standard two-fragment answer to a mutation: clear the modal
	/// container, then refresh `region`.
	pub fn mutation(settings: &EditingSettings, region: RefreshRegion) -> Result<Self> {
		let clear = SwapTarget::id(settings.modal_container_id.clone())?;
		let (target, swap, content) = match region {
			RefreshRegion::PageContent(content) => (
				SwapTarget::id(settings.page_container_id.clone())?,
				SwapDirective::True,
				content,
			),
			RefreshRegion::ModuleContainer(content) => (
				SwapTarget::class(settings.module_container_class.clone())?,
				SwapDirective::OuterHtml,
				content,
			),
		};
		Ok(Self::new(Node::empty())
			.with_fragment(clear, SwapDirective::True, Node::empty())
			.with_fragment(target, swap, content))
	}

	/// A single fragment that fills the modal container, used for notices
	/// (permission denied, validation errors) that change nothing else.
	pub fn notice(settings: &EditingSettings, modal: Node) -> Result<Self> {
		let target = SwapTarget::id(settings.modal_container_id.clone())?;
		Ok(Self::new(Node::empty()).with_fragment(target, SwapDirective::InnerHtml, modal))
	}

	pub fn fragment_count(&self) -> usize {
		self.fragments.len()
	}

	pub fn primary(&self) -> &Node {
		&self.primary
	}

	/// Targets of the fragments, in order.
	pub fn targets(&self) -> impl Iterator<Item = (&SwapTarget, SwapDirective)> {
		self.fragments.iter().map(|f| (&f.target, f.swap))
	}

	/// Serializes the primary followed by every wrapped fragment.
	pub fn render(&self) -> Result<String> {
		let mut out = self.primary.render(&RenderContext::empty());
		for fragment in &self.fragments {
			out.push_str(&fragment.wrap()?.render_to_string());
		}
		Ok(out)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case(SwapDirective::True, "true")]
	#[case(SwapDirective::InnerHtml, "innerHTML")]
	#[case(SwapDirective::OuterHtml, "outerHTML")]
	#[case(SwapDirective::BeforeEnd, "beforeend")]
	#[case(SwapDirective::AfterBegin, "afterbegin")]
	#[case(SwapDirective::Delete, "delete")]
	fn test_directive_strings(#[case] directive: SwapDirective, #[case] expected: &str) {
		assert_eq!(directive.to_string(), expected);
	}

	#[test]
	fn test_module_container_region() {
		let html = OobResponse::mutation(
			&EditingSettings::default(),
			RefreshRegion::ModuleContainer(Node::text("rows")),
		)
		.unwrap()
		.render()
		.unwrap();
		insta::assert_snapshot!(
			html,
			@r#"<div hx-swap-oob="true" id="edit-modal-container"></div><div hx-swap-oob="outerHTML" class="container">rows</div>"#
		);
	}

	#[test]
	fn test_primary_comes_first() {
		let html = OobResponse::new(Node::text("notice"))
			.with_fragment(
				SwapTarget::id("a").unwrap(),
				SwapDirective::BeforeEnd,
				Node::text("1"),
			)
			.with_fragment(
				SwapTarget::class("b").unwrap(),
				SwapDirective::Delete,
				Node::empty(),
			)
			.render()
			.unwrap();
		assert_eq!(
			html,
			"notice<div hx-swap-oob=\"beforeend\" id=\"a\">1</div><div hx-swap-oob=\"delete\" class=\"b\"></div>"
		);
	}

	#[test]
	fn test_fragment_content_is_escaped() {
		let html = OobResponse::new(Node::empty())
			.with_fragment(
				SwapTarget::id("page-content").unwrap(),
				SwapDirective::True,
				Node::text("<script>alert(1)</script>"),
			)
			.render()
			.unwrap();
		assert!(!html.contains("<script>"));
	}

	#[rstest]
	#[case("x').remove();alert('xss');//")]
	#[case("page content")]
	#[case("")]
	fn test_rejects_unsafe_targets(#[case] id: &str) {
		assert!(SwapTarget::id(id).is_err());
		assert!(SwapTarget::class(id).is_err());
	}

	#[test]
	fn test_mutation_rejects_bad_settings() {
		let settings = EditingSettings {
			modal_container_id: "x').remove();//".to_string(),
			..EditingSettings::default()
		};
		assert!(OobResponse::mutation(&settings, RefreshRegion::PageContent(Node::empty())).is_err());
	}

	#[test]
	fn test_notice_is_single_fragment() {
		let response =
			OobResponse::notice(&EditingSettings::default(), Node::text("denied")).unwrap();
		assert_eq!(response.fragment_count(), 1);
		assert_eq!(
			response.render().unwrap(),
			"<div hx-swap-oob=\"innerHTML\" id=\"edit-modal-container\">denied</div>"
		);
	}

	proptest! {
		#[test]
		fn prop_render_is_deterministic(texts in proptest::collection::vec(".*", 0..5)) {
			let mut response = OobResponse::new(Node::empty());
			for (i, text) in texts.iter().enumerate() {
				response = response.with_fragment(
					SwapTarget::id(format!("target-{i}")).unwrap(),
					SwapDirective::InnerHtml,
					Node::text(text.clone()),
				);
			}
			let first = response.render().unwrap();
			let second = response.clone().render().unwrap();
			prop_assert_eq!(first, second);
			prop_assert_eq!(response.fragment_count(), texts.len());
		}
	}
}
