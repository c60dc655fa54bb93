//! The module family: content, list and the editable wrapper.

pub mod content;
pub mod editable;
pub mod list;

pub use content::ContentModule;
pub use editable::EditableModule;
pub use list::{ListItem, SimpleListModule};
