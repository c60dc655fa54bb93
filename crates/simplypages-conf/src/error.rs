//! Settings errors.

use simplypages_core::ValidationError;

/// Error raised while loading or validating settings.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid value for '{key}': {message}")]
	InvalidValue { key: String, message: String },

	#[error("Invalid identifier in settings: {0}")]
	Identifier(#[from] ValidationError),

	#[error("Failed to assemble settings: {0}")]
	Deserialize(#[from] serde_json::Error),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
