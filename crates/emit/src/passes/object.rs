//! Owning objects.
//!
//! The loader hands out pointers to `<Handle>_T`. Each one owns its override
//! base and forwards every operation to it.

use std::fmt::{self, Write};

use icdgen_registry::{Command, GroupedCommands};

use crate::writer::{Spacing, arg_list, base_type_name, guarded, operations, param_list};

pub(crate) fn write(out: &mut String, grouped: &GroupedCommands<'_>) -> fmt::Result {
	for group in grouped.object_handles() {
		let Some(handle) = group.handle else {
			continue;
		};
		let base = base_type_name(handle);
		let object = format!("{handle}_T");

		writeln!(out, "struct {object} : vkmock::VkObjectBase\n{{")?;
		writeln!(out, "  vkmock::{base}* m_pImpl = nullptr;\n")?;
		writeln!(out, "  explicit {object}( vkmock::{base}* pImpl ) : m_pImpl( pImpl ) {{}}\n")?;
		writeln!(out, "  {object}( const {object}& ) = delete;")?;
		writeln!(out, "  {object}& operator=( const {object}& ) = delete;\n")?;
		writeln!(
			out,
			"  {object}( {object}&& other ) noexcept : m_pImpl( other.m_pImpl ) {{ other.m_pImpl = nullptr; }}"
		)?;
		writeln!(out, "  {object}& operator=( {object}&& other ) noexcept")?;
		out.push_str(concat!(
			"  {\n",
			"    if( this != &other )\n",
			"    {\n",
			"      delete m_pImpl;\n",
			"      m_pImpl = other.m_pImpl;\n",
			"      other.m_pImpl = nullptr;\n",
			"    }\n",
			"    return *this;\n",
			"  }\n\n",
		));
		writeln!(out, "  ~{object}() {{ delete m_pImpl; }}\n")?;

		for bucket in group.buckets() {
			let commands = operations(&bucket);
			if commands.is_empty() {
				continue;
			}
			guarded(out, bucket.extension, Spacing::Block, |out| {
				for command in commands {
					write_forwarder(out, command)?;
				}
				Ok(())
			})?;
		}
		out.push_str("};\n\n");
	}
	Ok(())
}

fn write_forwarder(out: &mut String, command: &Command) -> fmt::Result {
	writeln!(
		out,
		"  {} {}{}",
		command.return_type,
		command.name,
		param_list(command.forwarded_params(), "    ")
	)?;
	writeln!(
		out,
		"  {{\n    return m_pImpl->{}{};\n  }}\n",
		command.name,
		arg_list(command.forwarded_params())
	)
}
