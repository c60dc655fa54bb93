//! Core component trait and common types

use simplypages_core::{Node, Result};

/// Component trait - base interface for widgets and modules
///
/// A component is a configuration value. Converting it to a [`Node`] runs
/// every validation the configuration needs, so a component that produces a
/// node is safe to render.
pub trait Component {
	/// Returns the component's name (for debugging)
	fn name(&self) -> &'static str;

	/// Builds the render tree for this component
	fn to_node(&self) -> Result<Node>;

	/// Builds and renders with an empty context
	fn render(&self) -> Result<String> {
		Ok(self.to_node()?.render_to_string())
	}
}

/// Color variant for components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
	/// Primary color (default blue)
	#[default]
	Primary,
	/// Secondary color (default gray)
	Secondary,
	/// Success color (default green)
	Success,
	/// Danger color (default red)
	Danger,
	/// Warning color (default yellow)
	Warning,
	/// Info color (default cyan)
	Info,
	/// Light color (default light gray)
	Light,
	/// Dark color (default dark gray)
	Dark,
	/// Borderless, link-styled
	Link,
}

impl Variant {
	/// Convert variant to CSS class string
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Primary => "primary",
			Self::Secondary => "secondary",
			Self::Success => "success",
			Self::Danger => "danger",
			Self::Warning => "warning",
			Self::Info => "info",
			Self::Light => "light",
			Self::Dark => "dark",
			Self::Link => "link",
		}
	}
}

/// Size variant for components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
	/// Small
	Sm,
	/// Medium (default)
	#[default]
	Md,
	/// Large
	Lg,
}

impl Size {
	/// Class suffix, `None` for the default size
	pub fn suffix(&self) -> Option<&'static str> {
		match self {
			Self::Sm => Some("sm"),
			Self::Md => None,
			Self::Lg => Some("lg"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_variant_as_str() {
		assert_eq!(Variant::Primary.as_str(), "primary");
		assert_eq!(Variant::Secondary.as_str(), "secondary");
		assert_eq!(Variant::Success.as_str(), "success");
		assert_eq!(Variant::Danger.as_str(), "danger");
		assert_eq!(Variant::Warning.as_str(), "warning");
		assert_eq!(Variant::Info.as_str(), "info");
		assert_eq!(Variant::Light.as_str(), "light");
		assert_eq!(Variant::Dark.as_str(), "dark");
		assert_eq!(Variant::Link.as_str(), "link");
	}

	#[test]
	fn test_size_suffix() {
		assert_eq!(Size::Sm.suffix(), Some("sm"));
		assert_eq!(Size::Md.suffix(), None);
		assert_eq!(Size::Lg.suffix(), Some("lg"));
	}
}
