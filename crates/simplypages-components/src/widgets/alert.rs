//! Alert box

use simplypages_core::{Node, Result};

use super::Extras;
use crate::component::Component;
use crate::html::div;

/// Alert kind, rendered as `alert-<kind>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
	Info,
	Success,
	Warning,
	Danger,
}

impl AlertType {
	pub fn css_class(&self) -> &'static str {
		match self {
			Self::Info => "alert-info",
			Self::Success => "alert-success",
			Self::Warning => "alert-warning",
			Self::Danger => "alert-danger",
		}
	}
}

/// A message box. The message is always treated as text.
///
/// # Examples
///
/// ```
/// use simplypages_components::{Alert, Component};
///
/// let html = Alert::danger("Module <b>not</b> found").render().unwrap();
/// assert_eq!(
/// 	html,
/// 	"<div class=\"alert alert-danger\">Module &lt;b&gt;not&lt;/b&gt; found</div>"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Alert {
	message: String,
	kind: AlertType,
	dismissible: bool,
	extras: Extras,
}

impl Alert {
	pub fn new(message: impl Into<String>, kind: AlertType) -> Self {
		Self {
			message: message.into(),
			kind,
			dismissible: false,
			extras: Extras::default(),
		}
	}

	pub fn info(message: impl Into<String>) -> Self {
		Self::new(message, AlertType::Info)
	}

	pub fn success(message: impl Into<String>) -> Self {
		Self::new(message, AlertType::Success)
	}

	pub fn warning(message: impl Into<String>) -> Self {
		Self::new(message, AlertType::Warning)
	}

	pub fn danger(message: impl Into<String>) -> Self {
		Self::new(message, AlertType::Danger)
	}

	pub fn dismissible(mut self) -> Self {
		self.dismissible = true;
		self
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn kind(&self) -> AlertType {
		self.kind
	}
}

extras_setters!(Alert);

impl Component for Alert {
	fn name(&self) -> &'static str {
		"Alert"
	}

	fn to_node(&self) -> Result<Node> {
		let mut builder = div().class("alert").class(self.kind.css_class());
		if self.dismissible {
			builder = builder.class("alert-dismissible");
		}
		self.extras
			.apply(builder)
			.text(self.message.clone())
			.build()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Alert::info("m"), "alert alert-info")]
	#[case(Alert::success("m"), "alert alert-success")]
	#[case(Alert::warning("m"), "alert alert-warning")]
	#[case(Alert::danger("m"), "alert alert-danger")]
	fn test_alert_classes(#[case] alert: Alert, #[case] classes: &str) {
		assert_eq!(
			alert.render().unwrap(),
			format!("<div class=\"{classes}\">m</div>")
		);
	}

	#[test]
	fn test_alert_extra_class_and_dismissible() {
		let html = Alert::info("Edits will be staged for approval.")
			.dismissible()
			.class("mb-3")
			.render()
			.unwrap();
		assert_eq!(
			html,
			"<div class=\"alert alert-info alert-dismissible mb-3\">Edits will be staged for approval.</div>"
		);
	}
}
