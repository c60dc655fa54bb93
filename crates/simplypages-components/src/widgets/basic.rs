//! Headings, paragraphs, links and images.

use simplypages_core::{Node, Result};

use super::Extras;
use crate::component::Component;
use crate::html::{a, heading, img, p};

/// `<h1>` through `<h6>` with text content.
#[derive(Debug, Clone)]
pub struct Heading {
	level: u8,
	text: String,
	extras: Extras,
}

impl Heading {
	pub fn new(level: u8, text: impl Into<String>) -> Self {
		Self {
			level: level.clamp(1, 6),
			text: text.into(),
			extras: Extras::default(),
		}
	}

	pub fn h1(text: impl Into<String>) -> Self {
		Self::new(1, text)
	}

	pub fn h2(text: impl Into<String>) -> Self {
		Self::new(2, text)
	}

	pub fn h3(text: impl Into<String>) -> Self {
		Self::new(3, text)
	}

	pub fn h4(text: impl Into<String>) -> Self {
		Self::new(4, text)
	}

	pub fn level(&self) -> u8 {
		self.level
	}
}

extras_setters!(Heading);

impl Component for Heading {
	fn name(&self) -> &'static str {
		"Heading"
	}

	fn to_node(&self) -> Result<Node> {
		self.extras
			.apply(heading(self.level))
			.text(self.text.clone())
			.build()
	}
}

/// `<p>` with text content.
#[derive(Debug, Clone)]
pub struct Paragraph {
	text: String,
	extras: Extras,
}

impl Paragraph {
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			extras: Extras::default(),
		}
	}
}

extras_setters!(Paragraph);

impl Component for Paragraph {
	fn name(&self) -> &'static str {
		"Paragraph"
	}

	fn to_node(&self) -> Result<Node> {
		self.extras.apply(p()).text(self.text.clone()).build()
	}
}

/// Anchor whose target passes the URL allow-list.
///
/// ```
/// use simplypages_components::{Component, Link};
///
/// assert!(Link::new("/docs", "Docs").to_node().is_ok());
/// assert!(Link::new("javascript:alert(1)", "x").to_node().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Link {
	href: String,
	text: String,
	new_tab: bool,
	extras: Extras,
}

impl Link {
	pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			href: href.into(),
			text: text.into(),
			new_tab: false,
			extras: Extras::default(),
		}
	}

	/// Opens in a new tab with `rel="noopener noreferrer"`.
	pub fn new_tab(mut self) -> Self {
		self.new_tab = true;
		self
	}
}

extras_setters!(Link);

impl Component for Link {
	fn name(&self) -> &'static str {
		"Link"
	}

	fn to_node(&self) -> Result<Node> {
		let mut builder = self.extras.apply_classes(a()).href(self.href.clone());
		if self.new_tab {
			builder = builder
				.attr("target", "_blank")
				.attr("rel", "noopener noreferrer");
		}
		self.extras
			.apply_attrs(builder)
			.text(self.text.clone())
			.build()
	}
}

/// `<img>` whose source passes the image allow-list.
#[derive(Debug, Clone)]
pub struct Image {
	src: String,
	alt: String,
	extras: Extras,
}

impl Image {
	pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
		Self {
			src: src.into(),
			alt: alt.into(),
			extras: Extras::default(),
		}
	}
}

extras_setters!(Image);

impl Component for Image {
	fn name(&self) -> &'static str {
		"Image"
	}

	fn to_node(&self) -> Result<Node> {
		let builder = self
			.extras
			.apply_classes(img())
			.src(self.src.clone())
			.attr("alt", self.alt.clone());
		self.extras.apply_attrs(builder).build()
	}
}
