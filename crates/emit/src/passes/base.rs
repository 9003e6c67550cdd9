//! Per-handle override bases.
//!
//! A mock implementation derives from `vkmock::<Handle>Base` and overrides the
//! operations it cares about. Every other operation returns a
//! value-initialised result, or forwards to the command it aliases when that
//! command lives in the same base.

use std::fmt::{self, Write};

use icdgen_registry::{Command, GroupedCommands, HandleGroup};

use crate::writer::{Spacing, arg_list, base_type_name, guarded, operations, param_list};

pub(crate) fn write(out: &mut String, grouped: &GroupedCommands<'_>) -> fmt::Result {
	out.push_str("struct VkObjectBase\n{\n  uintptr_t m_LoaderMagic = ICD_LOADER_MAGIC;\n};\n\n");

	for group in grouped.object_handles() {
		let Some(handle) = group.handle else {
			continue;
		};
		let base = base_type_name(handle);
		writeln!(out, "struct {base}\n{{")?;
		writeln!(out, "  virtual ~{base}() = default;\n")?;
		for bucket in group.buckets() {
			let commands = operations(&bucket);
			if commands.is_empty() {
				continue;
			}
			guarded(out, bucket.extension, Spacing::Block, |out| {
				for command in commands {
					write_operation(out, group, command)?;
				}
				Ok(())
			})?;
		}
		out.push_str("};\n\n");
	}
	Ok(())
}

fn write_operation(out: &mut String, group: HandleGroup<'_, '_>, command: &Command) -> fmt::Result {
	writeln!(
		out,
		"  virtual {} {}{}",
		command.return_type,
		command.name,
		param_list(command.forwarded_params(), "    ")
	)?;
	let body = match forward_target(group, command) {
		Some(target) => format!("{{ return {}{}; }}", target.name, arg_list(command.forwarded_params())),
		None if command.is_void() => "{}".to_owned(),
		None => "{ return {}; }".to_owned(),
	};
	writeln!(out, "  {body}\n")
}

/// The aliased command, when it is an operation of the same base.
fn forward_target<'a>(group: HandleGroup<'_, 'a>, command: &Command) -> Option<&'a Command> {
	let target = group.find(command.alias.as_deref()?)?;
	(!target.is_universal()).then_some(target)
}
