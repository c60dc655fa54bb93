//! Editing settings module.
//!
//! # Examples
//!
//! ```rust,no_run
//! use simplypages::conf::{EditingSettings, SettingsLoader, TomlFileSource};
//!
//! let settings: EditingSettings = SettingsLoader::new()
//! 	.with_source(TomlFileSource::new("simplypages.toml"))
//! 	.load()
//! 	.unwrap();
//! ```

pub use simplypages_conf::*;
