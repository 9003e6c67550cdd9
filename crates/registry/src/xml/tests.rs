use pretty_assertions::assert_eq;

use super::*;

#[test]
fn mixed_content_keeps_whitespace_between_children() {
	let root = parse("<param>const <type>VkInstanceCreateInfo</type>* <name>pCreateInfo</name></param>").unwrap();
	assert_eq!(root.all_text(), "const VkInstanceCreateInfo* pCreateInfo");

	let root = parse("<param><type>VkDevice</type> <name>device</name></param>").unwrap();
	assert_eq!(root.all_text(), "VkDevice device");
	assert_eq!(root.text(), " ");
}

#[test]
fn array_suffix_and_nested_enum_are_text() {
	let root = parse("<param><type>char</type> <name>name</name>[<enum>VK_MAX_NAME</enum>]</param>").unwrap();
	assert_eq!(root.all_text(), "char name[VK_MAX_NAME]");
	assert_eq!(root.child("name").map(Element::text).as_deref(), Some("name"));
}

#[test]
fn attributes_are_unescaped_and_ordered() {
	let root = parse(r#"<command name="a&amp;b" alias="c"/>"#).unwrap();
	assert_eq!(root.attr("name"), Some("a&b"));
	assert_eq!(root.attr("alias"), Some("c"));
	assert_eq!(root.attr("api"), None);
	assert_eq!(root.attributes[0].0, "name");
}

#[test]
fn children_named_filters_in_document_order() {
	let root = parse("<r><a n=\"1\"/>text<b/><a n=\"2\"/></r>").unwrap();
	let names: Vec<_> = root.children_named("a").filter_map(|a| a.attr("n")).collect();
	assert_eq!(names, ["1", "2"]);
	assert_eq!(root.elements().count(), 3);
	assert_eq!(root.text(), "text");
}

#[test]
fn prolog_and_comments_are_dropped() {
	let root = parse("<?xml version=\"1.0\"?>\n<!-- c --><r><!-- inner -->x</r>\n").unwrap();
	assert_eq!(root.name, "r");
	assert_eq!(root.children, vec![Node::Text("x".to_owned())]);
}

#[test]
fn entities_do_not_split_text_runs() {
	let root = parse("<r>a &lt; b</r>").unwrap();
	assert_eq!(root.children.len(), 1);
	assert_eq!(root.text(), "a < b");
}

#[test]
fn mismatched_tags_are_syntax_errors() {
	assert!(matches!(parse("<a><b></a>"), Err(XmlError::Syntax { .. })));
}

#[test]
fn unclosed_and_empty_documents_fail() {
	assert!(parse("<a><b/>").is_err());
	assert!(matches!(parse("   "), Err(XmlError::NoRoot)));
}

#[test]
fn second_root_is_rejected() {
	assert!(matches!(parse("<a/><b/>"), Err(XmlError::MultipleRoots(name)) if name == "b"));
}
