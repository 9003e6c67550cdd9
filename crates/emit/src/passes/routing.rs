//! Free routing functions and the address lookups.
//!
//! Handle-bound commands become inline functions that call the operation on
//! their first argument. Global commands only get a prototype; their bodies
//! are written by hand next to the mock implementation.

use std::fmt::{self, Write};

use icdgen_registry::{Command, DEVICE_PROC_ADDR, GroupedCommands, INSTANCE_PROC_ADDR, Parameter};

use crate::writer::{Spacing, arg_list, guarded, operations, param_list};

pub(crate) fn write(out: &mut String, grouped: &GroupedCommands<'_>) -> fmt::Result {
	for bucket in grouped.buckets() {
		let commands = operations(&bucket);
		if commands.is_empty() {
			continue;
		}
		guarded(out, bucket.extension, Spacing::Block, |out| {
			for command in commands {
				match command.self_param() {
					Some(receiver) => write_router(out, command, receiver)?,
					None => write_prototype(out, command)?,
				}
			}
			Ok(())
		})?;
	}
	write_lookups(out, grouped)
}

fn write_router(out: &mut String, command: &Command, receiver: &Parameter) -> fmt::Result {
	writeln!(
		out,
		"inline {} {}{}",
		command.return_type,
		command.name,
		param_list(command.signature_params(), "  ")
	)?;
	writeln!(
		out,
		"{{\n  return {}->{}{};\n}}\n",
		receiver.name,
		command.name,
		arg_list(command.forwarded_params())
	)
}

fn write_prototype(out: &mut String, command: &Command) -> fmt::Result {
	writeln!(
		out,
		"{} {}{};\n",
		command.return_type,
		command.name,
		param_list(command.signature_params(), "  ")
	)
}

/// Instance lookup over every generated command; the device lookup defers to it.
fn write_lookups(out: &mut String, grouped: &GroupedCommands<'_>) -> fmt::Result {
	writeln!(
		out,
		"inline PFN_vkVoidFunction {DEVICE_PROC_ADDR}( VkDevice device, const char* pName );\n"
	)?;
	writeln!(
		out,
		"inline PFN_vkVoidFunction {INSTANCE_PROC_ADDR}( VkInstance instance, const char* pName )\n{{"
	)?;
	for bucket in grouped.buckets() {
		guarded(out, bucket.extension, Spacing::Tight, |out| {
			for command in bucket.commands {
				writeln!(
					out,
					"  if( !strcmp( \"{0}\", pName ) ) return reinterpret_cast<PFN_vkVoidFunction>( &{0} );",
					command.name
				)?;
			}
			Ok(())
		})?;
	}
	out.push_str("  return nullptr;\n}\n\n");
	writeln!(
		out,
		"inline PFN_vkVoidFunction {DEVICE_PROC_ADDR}( VkDevice device, const char* pName )\n{{"
	)?;
	writeln!(out, "  return {INSTANCE_PROC_ADDR}( nullptr, pName );\n}}")
}
