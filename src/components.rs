//! Widgets and modules.

pub use simplypages_components::*;
