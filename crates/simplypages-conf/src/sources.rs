//! Configuration sources for layered settings
//!
//! Sources are merged in priority order (environment variables > TOML file >
//! defaults). Each source yields a flat map of setting names to values.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{Result, SettingsError};
use crate::settings::EditingSettings;

/// Prefix for environment overrides (`SIMPLYPAGES_MODAL_CONTAINER_ID`).
pub const ENV_PREFIX: &str = "SIMPLYPAGES_";

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;

	/// Whether values arrive as untyped strings that should take the type of
	/// the setting they override.
	fn is_untyped(&self) -> bool {
		false
	}
}

/// Built-in defaults.
pub struct DefaultSource;

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>> {
		match serde_json::to_value(EditingSettings::default())? {
			Value::Object(map) => Ok(map.into_iter().collect()),
			_ => Ok(IndexMap::new()),
		}
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"defaults".to_string()
	}
}

/// A TOML file. Keys may sit at the top level or under an `[editing]` table.
pub struct TomlFileSource {
	path: PathBuf,
	required: bool,
}

impl TomlFileSource {
	pub fn new(path: impl AsRef<Path>) -> Self {
		Self {
			path: path.as_ref().to_path_buf(),
			required: true,
		}
	}

	/// Treat a missing file as empty instead of failing.
	pub fn optional(mut self) -> Self {
		self.required = false;
		self
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>> {
		if !self.required && !self.path.exists() {
			tracing::debug!(path = %self.path.display(), "optional settings file not found");
			return Ok(IndexMap::new());
		}
		let content = fs::read_to_string(&self.path)?;
		let parsed: Value = toml::from_str(&content)?;
		let table = match parsed {
			Value::Object(mut map) => match map.remove("editing") {
				Some(Value::Object(editing)) => editing,
				_ => map,
			},
			_ => serde_json::Map::new(),
		};
		Ok(table.into_iter().collect())
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Environment variables with a prefix.
///
/// Values arrive as strings and are coerced to the type of the setting they
/// override when the sources are merged.
pub struct EnvSource {
	prefix: String,
	vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
	/// Reads the process environment.
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			vars: None,
		}
	}

	/// Reads from an explicit list instead of the process environment.
	pub fn from_vars(
		prefix: impl Into<String>,
		vars: impl IntoIterator<Item = (String, String)>,
	) -> Self {
		Self {
			prefix: prefix.into(),
			vars: Some(vars.into_iter().collect()),
		}
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new(ENV_PREFIX)
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>> {
		let vars: Vec<(String, String)> = match &self.vars {
			Some(vars) => vars.clone(),
			None => std::env::vars().collect(),
		};
		let mut config = IndexMap::new();
		for (key, value) in vars {
			if let Some(name) = key.strip_prefix(&self.prefix)
				&& !name.is_empty()
			{
				config.insert(name.to_ascii_lowercase(), Value::String(value));
			}
		}
		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("environment variables with prefix {}", self.prefix)
	}

	fn is_untyped(&self) -> bool {
		true
	}
}

fn parse_bool(raw: &str) -> Option<bool> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Some(true),
		"false" | "0" | "no" | "off" => Some(false),
		_ => None,
	}
}

/// Converts a string override to the shape of the value it replaces.
fn coerce(key: &str, existing: Option<&Value>, value: Value) -> Result<Value> {
	let Value::String(raw) = value else {
		return Ok(value);
	};
	match existing {
		Some(Value::Bool(_)) => parse_bool(&raw).map(Value::Bool).ok_or_else(|| {
			SettingsError::InvalidValue {
				key: key.to_string(),
				message: format!("expected a boolean, got '{raw}'"),
			}
		}),
		Some(Value::Number(_)) => raw
			.trim()
			.parse::<u64>()
			.map(Value::from)
			.map_err(|e| SettingsError::InvalidValue {
				key: key.to_string(),
				message: e.to_string(),
			}),
		_ => Ok(Value::String(raw)),
	}
}

/// Merges configuration sources into [`EditingSettings`].
///
/// # Examples
///
/// ```
/// use simplypages_conf::{EnvSource, SettingsLoader};
///
/// let settings = SettingsLoader::new()
/// 	.with_source(EnvSource::from_vars(
/// 		"SIMPLYPAGES_",
/// 		[("SIMPLYPAGES_MAX_TITLE_LENGTH".to_string(), "80".to_string())],
/// 	))
/// 	.load()
/// 	.unwrap();
/// assert_eq!(settings.max_title_length, 80);
/// ```
pub struct SettingsLoader {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsLoader {
	/// Starts with the built-in defaults.
	pub fn new() -> Self {
		Self {
			sources: vec![Box::new(DefaultSource)],
		}
	}

	pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	pub fn with_toml_file(self, path: impl AsRef<Path>) -> Self {
		self.with_source(TomlFileSource::new(path))
	}

	/// Adds `SIMPLYPAGES_*` environment overrides.
	pub fn with_env(self) -> Self {
		self.with_source(EnvSource::default())
	}

	/// Loads, merges and validates.
	pub fn load(mut self) -> Result<EditingSettings> {
		self.sources.sort_by_key(|source| source.priority());

		let mut merged: IndexMap<String, Value> = IndexMap::new();
		for source in &self.sources {
			let values = source.load()?;
			tracing::debug!(
				source = %source.description(),
				keys = values.len(),
				"merging settings source"
			);
			for (key, value) in values {
				let value = if source.is_untyped() {
					coerce(&key, merged.get(&key), value)?
				} else {
					value
				};
				merged.insert(key, value);
			}
		}

		let object: serde_json::Map<String, Value> = merged.into_iter().collect();
		let settings: EditingSettings = serde_json::from_value(Value::Object(object))?;
		settings.validate()?;
		Ok(settings)
	}
}

impl Default for SettingsLoader {
	fn default() -> Self {
		Self::new()
	}
}
