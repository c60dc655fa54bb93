//! Module editing protocol.

pub use simplypages_editing::*;
