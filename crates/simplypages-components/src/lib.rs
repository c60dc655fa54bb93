//! # SimplyPages Components
//!
//! The widget catalog and the module family built on the
//! [`simplypages_core`] render tree.
//!
//! ## Widgets
//!
//! - [`Alert`], [`Button`], [`Modal`], [`ListGroup`]
//! - [`Heading`], [`Paragraph`], [`Link`], [`Image`]
//! - Form controls: [`TextInput`], [`TextArea`], [`Checkbox`], [`Select`]
//!   and the labelled field helpers ([`text_field`], [`text_area_field`],
//!   [`checkbox_field`], [`select_field`])
//!
//! ## Modules
//!
//! - [`Module`] / [`ModuleBuilder`]: an id-addressed section with a title
//! - [`ContentModule`]: title plus text or markdown
//! - [`SimpleListModule`]: title plus a list of editable items
//! - [`EditableModule`]: edit/delete affordances around a module
//!
//! ## Example
//!
//! ```
//! use simplypages_components::{Alert, Component};
//!
//! let html = Alert::info("Saved").render().unwrap();
//! assert_eq!(html, "<div class=\"alert alert-info\">Saved</div>");
//! ```

pub mod component;
pub mod html;
pub mod module;
pub mod modules;
pub mod widgets;

pub use component::{Component, Size, Variant};
pub use module::{EditMode, Module, ModuleBuilder};
pub use modules::editable::HasModuleId;
pub use modules::list::EMPTY_LIST_TEXT;
pub use modules::{ContentModule, EditableModule, ListItem, SimpleListModule};
pub use widgets::{
	Alert, AlertType, Button, ButtonType, Checkbox, Heading, Image, InputType, Link, ListGroup,
	Modal, Paragraph, Select, SelectOption, TextArea, TextInput, checkbox_field, select_field,
	text_area_field, text_field,
};
