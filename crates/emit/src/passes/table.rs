//! The `MockFunctions` table.
//!
//! One nullable function-pointer slot per per-object operation, plus a
//! `SetProcAddr` that fills a slot by command name.

use std::fmt::{self, Write};

use icdgen_registry::{Bucket, GroupedCommands};

use crate::writer::{Spacing, guarded, operations};

pub(crate) fn write(out: &mut String, grouped: &GroupedCommands<'_>) -> fmt::Result {
	out.push_str("struct MockFunctions\n{\n");
	for bucket in table_buckets(grouped) {
		let commands = operations(&bucket);
		guarded(out, bucket.extension, Spacing::Tight, |out| {
			for command in commands {
				writeln!(out, "  PFN_{0} {0} = nullptr;", command.name)?;
			}
			Ok(())
		})?;
	}

	out.push_str("\n  void SetProcAddr( const char* pName, PFN_vkVoidFunction pFunction )\n  {\n");
	for bucket in table_buckets(grouped) {
		let commands = operations(&bucket);
		guarded(out, bucket.extension, Spacing::Tight, |out| {
			for command in commands {
				writeln!(
					out,
					"    if( !strcmp( \"{0}\", pName ) ) {{ {0} = reinterpret_cast<PFN_{0}>( pFunction ); return; }}",
					command.name
				)?;
			}
			Ok(())
		})?;
	}
	out.push_str("  }\n};\n\n");
	Ok(())
}

fn table_buckets<'g, 'a>(grouped: &'g GroupedCommands<'a>) -> impl Iterator<Item = Bucket<'g, 'a>> {
	grouped
		.object_handles()
		.flat_map(|group| group.buckets())
		.filter(|bucket| !operations(bucket).is_empty())
}
