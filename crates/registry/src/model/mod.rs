//! Generator view of registry commands.

use crate::error::{RegistryError, Result};
use crate::spec::{RESTRICTED_PROFILE, RegistrySpec};
use crate::xml::Element;


/// Address-lookup entry points of the API itself.
///
/// They keep their place in the model and in the lookup table but are never
/// generated as per-object operations.
pub const UNIVERSAL_COMMANDS: [&str; 2] = [INSTANCE_PROC_ADDR, DEVICE_PROC_ADDR];

/// Instance-level address lookup.
pub const INSTANCE_PROC_ADDR: &str = "vkGetInstanceProcAddr";

/// Device-level address lookup.
pub const DEVICE_PROC_ADDR: &str = "vkGetDeviceProcAddr";

const VOID: &str = "void";

/// One `<param>` of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
	/// Verbatim declaration, e.g. `const VkInstanceCreateInfo* pCreateInfo`.
	pub declaration: String,
	/// Identifier used when forwarding the argument.
	pub name: String,
	/// Only present in the restricted profile.
	pub excluded: bool,
}

impl Parameter {
	pub fn from_element(param: &Element) -> Result<Self> {
		let name = param
			.child("name")
			.map(Element::text)
			.ok_or_else(|| RegistryError::Malformed(format!("<param> without <name>: '{}'", param.all_text().trim())))?;
		Ok(Self {
			declaration: param.all_text().trim().to_owned(),
			name,
			excluded: param.attr("api") == Some(RESTRICTED_PROFILE),
		})
	}
}

/// A resolved command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
	pub name: String,
	/// Command this one is declared as an alias of.
	pub alias: Option<String>,
	pub return_type: String,
	pub params: Vec<Parameter>,
	/// Handle type of the first parameter; `None` for global commands.
	pub handle: Option<String>,
	/// Extension requiring this command; `None` for core commands.
	pub extension: Option<String>,
	pub excluded: bool,
}

/// Outcome of turning one `<command>` record into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
	Command(Command),
	/// Alias whose target is not part of the loaded registry.
	Unresolved { name: String, target: String },
}

/// Commands kept for generation plus counts of the records that were not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSet {
	pub commands: Vec<Command>,
	pub excluded: usize,
	pub unresolved: usize,
}

impl Command {
	/// Builds the command for `element`, resolving aliases through `spec`.
	///
	/// Parameters come from the record itself when it declares any, otherwise
	/// from the resolved definition.
	pub fn extract(spec: &RegistrySpec, element: &Element) -> Result<Extraction> {
		let name = spec.command_name(element)?;
		let (Some(definition), Some(return_type)) =
			(spec.resolve_definition(element)?, spec.command_return_type(element)?)
		else {
			return Ok(Extraction::Unresolved {
				name,
				target: element.attr("alias").unwrap_or_default().to_owned(),
			});
		};

		let source = if element.child("param").is_some() {
			element
		} else {
			definition
		};
		let params = source
			.children_named("param")
			.map(Parameter::from_element)
			.collect::<Result<Vec<_>>>()?;

		Ok(Extraction::Command(Self {
			alias: element.attr("alias").map(str::to_owned),
			return_type,
			params,
			handle: spec.owning_handle(element)?,
			extension: spec.owning_extension(element)?.map(str::to_owned),
			excluded: spec.is_excluded_profile(element)?,
			name,
		}))
	}

	pub fn is_void(&self) -> bool {
		self.return_type == VOID
	}

	/// Whether this is one of [`UNIVERSAL_COMMANDS`].
	pub fn is_universal(&self) -> bool {
		UNIVERSAL_COMMANDS.contains(&self.name.as_str())
	}

	/// The owning-object parameter, for handle-bound commands.
	pub fn self_param(&self) -> Option<&Parameter> {
		self.handle.as_ref().and(self.params.first())
	}

	/// Every parameter that appears in generated signatures.
	pub fn signature_params(&self) -> impl Iterator<Item = &Parameter> {
		self.params.iter().filter(|p| !p.excluded)
	}

	/// Parameters passed on to the per-object operation: the signature minus
	/// the leading self parameter of handle-bound commands.
	pub fn forwarded_params(&self) -> impl Iterator<Item = &Parameter> {
		let skip = usize::from(self.handle.is_some());
		self.params.iter().skip(skip).filter(|p| !p.excluded)
	}
}
