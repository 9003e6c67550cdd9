//! Text helpers shared by the emitter passes.

use std::fmt::{self, Write};

use icdgen_registry::{Bucket, Command, Parameter};

/// Blank-line policy around an `#ifdef` region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Spacing {
	/// Blank line after the opening and closing directives.
	Block,
	/// Directives directly adjacent to their content.
	Tight,
}

/// Writes `body`, wrapped in an `#ifdef`/`#endif` pair when `extension` is set.
pub(crate) fn guarded<W, F>(out: &mut W, extension: Option<&str>, spacing: Spacing, body: F) -> fmt::Result
where
	W: Write,
	F: FnOnce(&mut W) -> fmt::Result,
{
	let Some(extension) = extension else {
		return body(out);
	};
	let gap = match spacing {
		Spacing::Block => "\n",
		Spacing::Tight => "",
	};
	write!(out, "#ifdef {extension}\n{gap}")?;
	body(out)?;
	write!(out, "#endif // {extension}\n{gap}")
}

/// Parenthesised declaration list, one parameter per line.
pub(crate) fn param_list<'p>(params: impl IntoIterator<Item = &'p Parameter>, indent: &str) -> String {
	let lines: Vec<String> = params
		.into_iter()
		.map(|param| format!("{indent}{}", param.declaration))
		.collect();
	if lines.is_empty() {
		"()".to_owned()
	} else {
		format!("(\n{} )", lines.join(",\n"))
	}
}

/// Parenthesised argument list for forwarding calls.
pub(crate) fn arg_list<'p>(params: impl IntoIterator<Item = &'p Parameter>) -> String {
	let names: Vec<&str> = params.into_iter().map(|param| param.name.as_str()).collect();
	if names.is_empty() {
		"()".to_owned()
	} else {
		format!("( {} )", names.join(", "))
	}
}

/// Name of the override base for `handle`: `VkDevice` becomes `DeviceBase`.
pub(crate) fn base_type_name(handle: &str) -> String {
	let stem = handle
		.strip_prefix("Vk")
		.filter(|stem| !stem.is_empty())
		.unwrap_or(handle);
	format!("{stem}Base")
}

/// Commands of `bucket` that become per-object operations.
pub(crate) fn operations<'a>(bucket: &Bucket<'_, 'a>) -> Vec<&'a Command> {
	bucket
		.commands
		.iter()
		.copied()
		.filter(|command| !command.is_universal())
		.collect()
}
