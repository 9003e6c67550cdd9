//! Owned, order-preserving XML element tree.
//!
//! Registry parameters are mixed content (`const <type>VkFoo</type>* <name>p</name>`),
//! so character data is kept verbatim, including whitespace-only runs between
//! child elements. Comments, processing instructions and the prolog are dropped.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::XmlError;

#[cfg(test)]
mod tests;

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	Element(Element),
	Text(String),
}

/// An XML element with attributes and children in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
	pub name: String,
	pub attributes: Vec<(String, String)>,
	pub children: Vec<Node>,
}

impl Element {
	/// Returns the value of attribute `key`, if present.
	pub fn attr(&self, key: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// Iterates over the child elements, skipping text.
	pub fn elements(&self) -> impl Iterator<Item = &Element> {
		self.children.iter().filter_map(|child| match child {
			Node::Element(el) => Some(el),
			Node::Text(_) => None,
		})
	}

	/// Iterates over the child elements named `name`.
	pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
		self.elements().filter(move |el| el.name == name)
	}

	/// Returns the first child element named `name`.
	pub fn child(&self, name: &str) -> Option<&Element> {
		self.elements().find(|el| el.name == name)
	}

	/// Concatenates the direct text children.
	pub fn text(&self) -> String {
		self.children
			.iter()
			.filter_map(|child| match child {
				Node::Text(text) => Some(text.as_str()),
				Node::Element(_) => None,
			})
			.collect()
	}

	/// Concatenates all descendant text in document order.
	pub fn all_text(&self) -> String {
		let mut out = String::new();
		self.collect_text(&mut out);
		out
	}

	fn collect_text(&self, out: &mut String) {
		for child in &self.children {
			match child {
				Node::Text(text) => out.push_str(text),
				Node::Element(el) => el.collect_text(out),
			}
		}
	}
}

/// Parses `source` into its root element.
pub fn parse(source: &str) -> Result<Element, XmlError> {
	let mut reader = Reader::from_str(source);
	let mut stack: Vec<Element> = Vec::new();
	let mut root: Option<Element> = None;

	loop {
		let event = match reader.read_event() {
			Ok(event) => event,
			Err(source) => {
				return Err(XmlError::Syntax {
					position: reader.buffer_position(),
					source,
				});
			}
		};

		match event {
			Event::Start(start) => stack.push(open(&start)?),
			Event::Empty(start) => {
				let element = open(&start)?;
				attach(&mut stack, &mut root, element)?;
			}
			Event::End(end) => {
				let Some(element) = stack.pop() else {
					return Err(XmlError::UnexpectedClose(
						String::from_utf8_lossy(end.name().as_ref()).into_owned(),
					));
				};
				attach(&mut stack, &mut root, element)?;
			}
			Event::Text(text) => {
				if let Some(parent) = stack.last_mut() {
					push_text(parent, &text.unescape()?);
				}
			}
			Event::CData(data) => {
				if let Some(parent) = stack.last_mut() {
					let text = String::from_utf8(data.into_inner().into_owned())?;
					push_text(parent, &text);
				}
			}
			Event::Eof => break,
			_ => {}
		}
	}

	if let Some(open) = stack.pop() {
		return Err(XmlError::Unclosed(open.name));
	}
	root.ok_or(XmlError::NoRoot)
}

fn open(start: &BytesStart<'_>) -> Result<Element, XmlError> {
	let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
	let mut attributes = Vec::new();
	for attr in start.attributes() {
		let attr = attr?;
		let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
		let value = attr.unescape_value()?.into_owned();
		attributes.push((key, value));
	}
	Ok(Element {
		name,
		attributes,
		children: Vec::new(),
	})
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<(), XmlError> {
	match stack.last_mut() {
		Some(parent) => parent.children.push(Node::Element(element)),
		None if root.is_some() => return Err(XmlError::MultipleRoots(element.name)),
		None => *root = Some(element),
	}
	Ok(())
}

/// Appends text, merging with a preceding text node so entity boundaries do
/// not split runs.
fn push_text(parent: &mut Element, text: &str) {
	if let Some(Node::Text(last)) = parent.children.last_mut() {
		last.push_str(text);
	} else {
		parent.children.push(Node::Text(text.to_owned()));
	}
}
