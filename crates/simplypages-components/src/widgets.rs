//! Leaf widget catalog.
//!
//! Every widget is a plain configuration value. Validation (URLs, ids, CSS
//! lengths) happens in [`Component::to_node`](crate::Component::to_node).

/// Adds the shared `class`, `attr` and dimension setters to a widget with an
/// `extras: Extras` field.
macro_rules! extras_setters {
	($ty:ty) => {
		impl $ty {
			/// Adds one or more class tokens.
			pub fn class(mut self, tokens: impl Into<String>) -> Self {
				self.extras.class(tokens);
				self
			}

			/// Sets an arbitrary attribute (validated when the node is built).
			pub fn attr(
				mut self,
				name: impl Into<std::borrow::Cow<'static, str>>,
				value: impl Into<std::borrow::Cow<'static, str>>,
			) -> Self {
				self.extras.attr(name, value);
				self
			}

			/// Sets `width` from a CSS length.
			pub fn width(mut self, value: impl Into<String>) -> Self {
				self.extras.dimension($crate::widgets::Dimension::Width, value);
				self
			}

			/// Sets `max-width` from a CSS length.
			pub fn max_width(mut self, value: impl Into<String>) -> Self {
				self.extras.dimension($crate::widgets::Dimension::MaxWidth, value);
				self
			}

			/// Sets `min-width` from a CSS length.
			pub fn min_width(mut self, value: impl Into<String>) -> Self {
				self.extras.dimension($crate::widgets::Dimension::MinWidth, value);
				self
			}
		}
	};
}

pub mod alert;
pub mod basic;
pub mod button;
pub mod form;
pub mod list;
pub mod modal;

pub use alert::{Alert, AlertType};
pub use basic::{Heading, Image, Link, Paragraph};
pub use button::{Button, ButtonType};
pub use form::{
	Checkbox, InputType, Select, SelectOption, TextArea, TextInput, checkbox_field, select_field,
	text_area_field, text_field,
};
pub use list::ListGroup;
pub use modal::Modal;

use std::borrow::Cow;

use simplypages_core::ElementBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dimension {
	Width,
	MaxWidth,
	MinWidth,
}

/// Extra classes, attributes and dimensions a caller layers onto a widget.
#[derive(Debug, Clone, Default)]
pub(crate) struct Extras {
	classes: Vec<String>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	dimensions: Vec<(Dimension, String)>,
}

impl Extras {
	pub(crate) fn class(&mut self, tokens: impl Into<String>) {
		self.classes.push(tokens.into());
	}

	pub(crate) fn attr(
		&mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) {
		self.attrs.push((name.into(), value.into()));
	}

	pub(crate) fn dimension(&mut self, dimension: Dimension, value: impl Into<String>) {
		self.dimensions.push((dimension, value.into()));
	}

	/// Adds the extra classes only.
	pub(crate) fn apply_classes(&self, mut builder: ElementBuilder) -> ElementBuilder {
		for class in &self.classes {
			builder = builder.class(class);
		}
		builder
	}

	/// Adds attributes and dimensions; classes are applied separately so
	/// widgets control where they fall in the class list.
	pub(crate) fn apply_attrs(&self, mut builder: ElementBuilder) -> ElementBuilder {
		for (name, value) in &self.attrs {
			builder = builder.attr(name.clone(), value.clone());
		}
		for (dimension, value) in &self.dimensions {
			builder = match dimension {
				Dimension::Width => builder.width(value),
				Dimension::MaxWidth => builder.max_width(value),
				Dimension::MinWidth => builder.min_width(value),
			};
		}
		builder
	}

	pub(crate) fn apply(&self, builder: ElementBuilder) -> ElementBuilder {
		self.apply_attrs(self.apply_classes(builder))
	}
}
