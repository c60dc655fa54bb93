//! Module family integration tests
//!
//! Test Categories:
//! - Composition: modules wrapped with edit affordances
//! - Byte-stable Output: exact module markup
//! - Security: user content inside modules stays escaped

use rstest::*;
use simplypages_components::{
	Component, ContentModule, EditMode, EditableModule, Modal, SimpleListModule, text_field,
};
use simplypages_core::{Node, RenderContext};

#[fixture]
fn list_module() -> SimpleListModule {
	SimpleListModule::new("module-9")
		.unwrap()
		.with_title("Nested Editing Demo")
		.with_item("Alpha")
		.with_item("Beta")
}

// ============================================================================
// Composition
// ============================================================================

#[rstest]
fn test_list_module_in_wrapper(list_module: SimpleListModule) {
	let html = EditableModule::wrap(&list_module)
		.unwrap()
		.edit_url("/editing-demo/edit/module-9")
		.edit_mode(EditMode::OwnerEdit)
		.render()
		.unwrap();

	assert!(html.starts_with(
		"<div class=\"editable-module-wrapper\" id=\"editable-module-9\"><button"
	));
	assert!(html.contains("hx-get=\"/editing-demo/edit/module-9?editMode=owner\""));
	assert!(html.contains("<li class=\"list-group-item\">Alpha</li>"));
	assert!(!html.contains("module-delete-btn"));
}

#[rstest]
fn test_modal_with_form_body() {
	let body = text_field("Item Text", "text", "").unwrap();
	let html = Modal::new()
		.title("Add New Item")
		.body(body)
		.render()
		.unwrap();
	assert!(html.contains("<h3 class=\"modal-title\">Add New Item</h3>"));
	assert!(html.contains("<p class=\"form-label\">Item Text:</p>"));
}

#[rstest]
fn test_render_is_stable_across_contexts(list_module: SimpleListModule) {
	let node = list_module.to_node().unwrap();
	let nested = RenderContext::empty().descend().descend();
	assert_eq!(node.render(&RenderContext::empty()), node.render(&nested));
}

// ============================================================================
// Byte-stable Output
// ============================================================================

#[rstest]
fn test_content_module_markup() {
	let module = ContentModule::new("module-1")
		.unwrap()
		.with_title("Public Content")
		.with_content("This module can be edited by *editors*");

	assert_eq!(
		module.render().unwrap(),
		"<div id=\"module-1\" class=\"module content-module\"><h2 class=\"module-title\">Public Content</h2><div class=\"module-content\"><div class=\"markdown-content\"><p>This module can be edited by <em>editors</em></p>\n</div></div></div>"
	);
}

// ============================================================================
// Security
// ============================================================================

#[rstest]
#[case("<script>alert(1)</script>")]
#[case("\"><img src=x onerror=alert(1)>")]
fn test_list_items_are_escaped(#[case] payload: &str) {
	let list = SimpleListModule::new("module-9").unwrap().with_item(payload);
	let html = list.render().unwrap();
	assert!(!html.contains("<script>"));
	assert!(!html.contains("<img"));
}

#[rstest]
fn test_titles_are_escaped() {
	let module = ContentModule::new("m")
		.unwrap()
		.with_title("<b>bold</b>")
		.with_custom_content(Node::empty());
	let html = module.render().unwrap();
	assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
}
