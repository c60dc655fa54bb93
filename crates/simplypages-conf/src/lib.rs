//! # SimplyPages Conf
//!
//! Settings for the editing protocol: container ids, route prefix, markdown
//! default and module width bounds.
//!
//! Settings are layered from built-in defaults, an optional TOML file and
//! `SIMPLYPAGES_*` environment variables, then validated before use.
//!
//! ```toml
//! [editing]
//! modal_container_id = "edit-modal-container"
//! page_container_id = "page-content"
//! route_prefix = "/editing-demo"
//! markdown_enabled_by_default = true
//! ```

pub mod error;
pub mod settings;
pub mod sources;

pub use error::{Result, SettingsError};
pub use settings::EditingSettings;
pub use sources::{ConfigSource, DefaultSource, ENV_PREFIX, EnvSource, SettingsLoader, TomlFileSource};
