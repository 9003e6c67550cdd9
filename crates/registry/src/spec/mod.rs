//! Queries over a loaded registry document.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::model::{Command, CommandSet, Extraction};
use crate::xml::{self, Element};


/// API profile whose commands and parameters are never generated.
pub const RESTRICTED_PROFILE: &str = "vulkansc";

/// How a handle type is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
	/// `VK_DEFINE_HANDLE`: a pointer to a loader-visible object.
	Dispatchable,
	/// `VK_DEFINE_NON_DISPATCHABLE_HANDLE`.
	NonDispatchable,
}

/// Indexed, read-only view of a registry document.
///
/// Name lookups (definitions, alias records, extension and restricted-feature
/// membership) are indexed once at load time.
#[derive(Debug)]
pub struct RegistrySpec {
	handles: IndexMap<String, HandleKind>,
	commands: Vec<Element>,
	definitions: FxHashMap<String, Vec<usize>>,
	aliases: FxHashMap<String, usize>,
	extensions: FxHashMap<String, String>,
	restricted: FxHashSet<String>,
}

impl RegistrySpec {
	/// Reads and indexes the registry at `path`.
	pub fn load(path: &Path) -> Result<Self> {
		let source = fs::read_to_string(path).map_err(|error| RegistryError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse_at(&source, path)
	}

	/// Indexes a registry held in memory.
	pub fn parse(source: &str) -> Result<Self> {
		Self::parse_at(source, Path::new("<inline>"))
	}

	fn parse_at(source: &str, path: &Path) -> Result<Self> {
		let root = xml::parse(source).map_err(|error| RegistryError::Xml {
			path: PathBuf::from(path),
			error,
		})?;
		Self::from_root(root)
	}

	/// Indexes an already parsed `<registry>` element.
	pub fn from_root(mut root: Element) -> Result<Self> {
		let handles = root
			.child("types")
			.map(collect_handles)
			.unwrap_or_default();
		let extensions = root
			.child("extensions")
			.map(collect_extension_commands)
			.unwrap_or_default();
		let restricted = collect_restricted_commands(&root);

		let section = root
			.children
			.iter_mut()
			.find_map(|child| match child {
				xml::Node::Element(el) if el.name == "commands" => Some(el),
				_ => None,
			})
			.ok_or_else(|| RegistryError::Malformed("registry has no <commands> section".into()))?;
		let commands: Vec<Element> = std::mem::take(&mut section.children)
			.into_iter()
			.filter_map(|child| match child {
				xml::Node::Element(el) if el.name == "command" => Some(el),
				_ => None,
			})
			.collect();

		let mut definitions: FxHashMap<String, Vec<usize>> = FxHashMap::default();
		let mut aliases = FxHashMap::default();
		for (index, command) in commands.iter().enumerate() {
			if let Some(name) = command.child("proto").and_then(|proto| proto.child("name")) {
				definitions.entry(name.text()).or_default().push(index);
			} else if let Some(name) = command.attr("name") {
				aliases.entry(name.to_owned()).or_insert(index);
			}
		}

		debug!(
			handles = handles.len(),
			commands = commands.len(),
			extension_commands = extensions.len(),
			restricted = restricted.len(),
			"registry indexed"
		);

		Ok(Self {
			handles,
			commands,
			definitions,
			aliases,
			extensions,
			restricted,
		})
	}

	/// Handle type names, in declaration order.
	pub fn handle_names(&self) -> impl Iterator<Item = &str> {
		self.handles.keys().map(String::as_str)
	}

	/// Declaration kind of handle `name`, or `None` if it is not a handle.
	pub fn handle_kind(&self, name: &str) -> Option<HandleKind> {
		self.handles.get(name).copied()
	}

	/// Raw `<command>` records in registry order.
	pub fn raw_commands(&self) -> &[Element] {
		&self.commands
	}

	/// Follows alias records until a record with a `<proto>` is reached.
	///
	/// Returns `Ok(None)` when a target is missing from the loaded registry or
	/// the chain loops; a record that is neither a definition nor an alias is
	/// malformed.
	pub fn resolve_definition<'a>(&'a self, command: &'a Element) -> Result<Option<&'a Element>> {
		let mut current = command;
		for _ in 0..=self.commands.len() {
			if current.child("proto").is_some() {
				return Ok(Some(current));
			}
			let Some(target) = current.attr("alias") else {
				return Err(RegistryError::Malformed(format!(
					"<command> '{}' has neither <proto> nor alias",
					current.attr("name").unwrap_or("?")
				)));
			};
			match self.lookup(target) {
				Some(next) => current = next,
				None => return Ok(None),
			}
		}
		Ok(None)
	}

	/// Public name of a command record.
	pub fn command_name(&self, command: &Element) -> Result<String> {
		if let Some(proto) = command.child("proto") {
			return proto
				.child("name")
				.map(Element::text)
				.ok_or_else(|| RegistryError::Malformed("<proto> without <name>".into()));
		}
		command
			.attr("name")
			.map(str::to_owned)
			.ok_or_else(|| RegistryError::Malformed("alias <command> without name".into()))
	}

	/// Return type of the resolved definition; `None` if it cannot be resolved.
	pub fn command_return_type(&self, command: &Element) -> Result<Option<String>> {
		let Some(definition) = self.resolve_definition(command)? else {
			return Ok(None);
		};
		definition_return_type(definition).map(Some)
	}

	/// Handle type of the resolved definition's first parameter.
	///
	/// `None` for global commands and for unresolvable aliases.
	pub fn owning_handle(&self, command: &Element) -> Result<Option<String>> {
		let Some(definition) = self.resolve_definition(command)? else {
			return Ok(None);
		};
		let first = definition
			.child("param")
			.and_then(|param| param.child("type"))
			.map(Element::text);
		Ok(first.filter(|ty| self.handle_kind(ty).is_some()))
	}

	/// First extension that requires this command by its own public name.
	pub fn owning_extension(&self, command: &Element) -> Result<Option<&str>> {
		let name = self.command_name(command)?;
		Ok(self.extensions.get(&name).map(String::as_str))
	}

	/// Whether the command belongs to [`RESTRICTED_PROFILE`] only.
	///
	/// Both checks look at the resolved definition: its explicit `api`
	/// attribute decides, otherwise membership of its name in a restricted
	/// `<feature>` requirement group does. An alias therefore shares the
	/// verdict of its target.
	pub fn is_excluded_profile(&self, command: &Element) -> Result<bool> {
		let Some(definition) = self.resolve_definition(command)? else {
			return Ok(false);
		};
		match definition.attr("api") {
			Some(api) => Ok(api == RESTRICTED_PROFILE),
			None => Ok(self.restricted.contains(&self.command_name(definition)?)),
		}
	}

	/// Extracts every command record, dropping restricted and unresolvable ones.
	pub fn commands(&self) -> Result<CommandSet> {
		let mut set = CommandSet::default();
		for element in &self.commands {
			match Command::extract(self, element)? {
				Extraction::Command(command) if command.excluded => {
					debug!(command = %command.name, "restricted profile; skipping");
					set.excluded += 1;
				}
				Extraction::Command(command) => set.commands.push(command),
				Extraction::Unresolved { name, target } => {
					debug!(command = %name, target = %target, "alias target not in registry; skipping");
					set.unresolved += 1;
				}
			}
		}
		Ok(set)
	}

	/// Record named `name`: a definition not tagged restricted when one
	/// exists, else the first definition, else an alias record.
	fn lookup(&self, name: &str) -> Option<&Element> {
		if let Some(indices) = self.definitions.get(name) {
			let preferred = indices
				.iter()
				.map(|&i| &self.commands[i])
				.find(|el| el.attr("api") != Some(RESTRICTED_PROFILE));
			return preferred.or_else(|| indices.first().map(|&i| &self.commands[i]));
		}
		self.aliases.get(name).map(|&i| &self.commands[i])
	}
}

fn definition_return_type(definition: &Element) -> Result<String> {
	definition
		.child("proto")
		.and_then(|proto| proto.child("type"))
		.map(Element::text)
		.ok_or_else(|| RegistryError::Malformed("<proto> without <type>".into()))
}

fn collect_handles(types: &Element) -> IndexMap<String, HandleKind> {
	types
		.children_named("type")
		.filter(|ty| ty.attr("category") == Some("handle"))
		.filter_map(|ty| {
			let name = ty.child("name")?.text();
			let kind = match ty.child("type").map(Element::text).as_deref() {
				Some("VK_DEFINE_NON_DISPATCHABLE_HANDLE") => HandleKind::NonDispatchable,
				_ => HandleKind::Dispatchable,
			};
			Some((name, kind))
		})
		.collect()
}

fn collect_extension_commands(extensions: &Element) -> FxHashMap<String, String> {
	let mut owners = FxHashMap::default();
	for extension in extensions.children_named("extension") {
		let Some(extension_name) = extension.attr("name") else {
			continue;
		};
		for require in extension.children_named("require") {
			for command in require.children_named("command") {
				if let Some(name) = command.attr("name") {
					owners
						.entry(name.to_owned())
						.or_insert_with(|| extension_name.to_owned());
				}
			}
		}
	}
	owners
}

fn collect_restricted_commands(root: &Element) -> FxHashSet<String> {
	root.children_named("feature")
		.filter(|feature| feature.attr("api") == Some(RESTRICTED_PROFILE))
		.flat_map(|feature| feature.children_named("require"))
		.flat_map(|require| require.children_named("command"))
		.filter_map(|command| command.attr("name").map(str::to_owned))
		.collect()
}
