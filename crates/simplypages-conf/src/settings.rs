//! Editing protocol settings.

use serde::{Deserialize, Serialize};
use simplypages_core::security::{validate_class_token, validate_dom_id};

use crate::error::{Result, SettingsError};

/// Settings shared by the edit modal, the OOB assembler and the endpoints.
///
/// # Examples
///
/// ```
/// use simplypages_conf::EditingSettings;
///
/// let settings = EditingSettings::default();
/// assert_eq!(settings.modal_container_id, "edit-modal-container");
/// assert_eq!(settings.page_container_id, "page-content");
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingSettings {
	/// Element that hosts edit modals; cleared after every mutation.
	pub modal_container_id: String,
	/// Element wrapping the whole page content.
	pub page_container_id: String,
	/// Class of the element wrapping the module list.
	pub module_container_class: String,
	/// Prepended to every endpoint path (`""` or `/something`).
	pub route_prefix: String,
	pub markdown_enabled_by_default: bool,
	pub max_title_length: usize,
	pub min_module_width: u8,
	pub max_module_width: u8,
}

impl Default for EditingSettings {
	fn default() -> Self {
		Self {
			modal_container_id: "edit-modal-container".to_string(),
			page_container_id: "page-content".to_string(),
			module_container_class: "container".to_string(),
			route_prefix: String::new(),
			markdown_enabled_by_default: true,
			max_title_length: 200,
			min_module_width: 1,
			max_module_width: 12,
		}
	}
}

impl EditingSettings {
	/// Checks identifiers and ranges.
	pub fn validate(&self) -> Result<()> {
		validate_dom_id(&self.modal_container_id)?;
		validate_dom_id(&self.page_container_id)?;
		validate_class_token(&self.module_container_class)?;

		if !self.route_prefix.is_empty()
			&& (!self.route_prefix.starts_with('/') || self.route_prefix.ends_with('/'))
		{
			return Err(SettingsError::InvalidValue {
				key: "route_prefix".to_string(),
				message: "must be empty or start with '/' and not end with '/'".to_string(),
			});
		}
		if self.min_module_width == 0 || self.min_module_width > self.max_module_width {
			return Err(SettingsError::InvalidValue {
				key: "min_module_width".to_string(),
				message: format!(
					"must be between 1 and max_module_width ({})",
					self.max_module_width
				),
			});
		}
		if self.max_title_length == 0 {
			return Err(SettingsError::InvalidValue {
				key: "max_title_length".to_string(),
				message: "must be greater than zero".to_string(),
			});
		}
		Ok(())
	}

	/// Joins `path` onto the route prefix.
	pub fn route(&self, path: &str) -> String {
		format!("{}{}", self.route_prefix, path)
	}

	/// Parses a module width and checks it against the configured range.
	pub fn parse_width(&self, raw: &str) -> Option<u8> {
		raw.trim()
			.parse::<u8>()
			.ok()
			.filter(|w| (self.min_module_width..=self.max_module_width).contains(w))
	}
}
