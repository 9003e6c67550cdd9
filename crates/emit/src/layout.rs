//! Where rendered sources land on disk.

use std::path::{Path, PathBuf};

use tracing::debug;

/// File name of the declarations header in a split layout.
pub const BASE_HEADER: &str = "vk_mock_icd_base.h";

/// File name of the routing header in a split layout.
pub const DISPATCH_HEADER: &str = "vk_mock_icd_dispatch.h";

const BANNER: &str = "// Generated by icdgen from the Vulkan API registry. Do not edit.\n";

const BASE_PRELUDE: &str = concat!(
	"#pragma once\n",
	"\n",
	"#define VK_NO_PROTOTYPES\n",
	"#include <vulkan/vulkan.h>\n",
	"#include <vulkan/vk_icd.h>\n",
	"#include <string.h>\n",
	"\n",
);

/// Rendered source text before it is split into files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sources {
	/// Bases, the function table and the owning objects.
	pub declarations: String,
	/// Routing functions and the address lookups.
	pub dispatch: String,
}

/// One file to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
	pub path: PathBuf,
	pub contents: String,
}

/// Output arrangement for a destination path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
	/// Everything in one header at this path.
	Single(PathBuf),
	/// [`BASE_HEADER`] and [`DISPATCH_HEADER`] inside this directory.
	Split(PathBuf),
}

impl Layout {
	/// An existing directory gets the split layout, anything else a single file.
	pub fn for_destination(path: &Path) -> Self {
		let layout = if path.is_dir() {
			Self::Split(path.to_path_buf())
		} else {
			Self::Single(path.to_path_buf())
		};
		debug!(?layout, "output layout");
		layout
	}

	/// Files this layout produces for `sources`, in publish order.
	pub fn artifacts(&self, sources: &Sources) -> Vec<Artifact> {
		match self {
			Self::Single(path) => vec![Artifact {
				path: path.clone(),
				contents: format!("{BANNER}{BASE_PRELUDE}{}{}", sources.declarations, sources.dispatch),
			}],
			Self::Split(dir) => vec![
				Artifact {
					path: dir.join(BASE_HEADER),
					contents: format!("{BANNER}{BASE_PRELUDE}{}", sources.declarations),
				},
				Artifact {
					path: dir.join(DISPATCH_HEADER),
					contents: format!(
						"{BANNER}#pragma once\n\n#include \"{BASE_HEADER}\"\n\n{}",
						sources.dispatch
					),
				},
			],
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn sources() -> Sources {
		Sources {
			declarations: "DECL\n".to_owned(),
			dispatch: "DISPATCH\n".to_owned(),
		}
	}

	#[test]
	fn single_file_holds_everything_in_order() {
		let artifacts = Layout::Single(PathBuf::from("out/icd.h")).artifacts(&sources());
		assert_eq!(artifacts.len(), 1);
		assert_eq!(artifacts[0].path, PathBuf::from("out/icd.h"));
		let contents = &artifacts[0].contents;
		assert!(contents.starts_with(BANNER));
		assert!(contents.contains("#include <vulkan/vk_icd.h>\n"));
		assert!(contents.ends_with("DECL\nDISPATCH\n"));
	}

	#[test]
	fn split_layout_includes_base_from_dispatch() {
		let artifacts = Layout::Split(PathBuf::from("gen")).artifacts(&sources());
		let paths: Vec<_> = artifacts.iter().map(|a| a.path.clone()).collect();
		assert_eq!(paths, vec![Path::new("gen").join(BASE_HEADER), Path::new("gen").join(DISPATCH_HEADER)]);
		assert!(artifacts[0].contents.ends_with("DECL\n"));
		assert!(!artifacts[0].contents.contains("DISPATCH"));
		assert_eq!(
			artifacts[1].contents,
			format!("{BANNER}#pragma once\n\n#include \"vk_mock_icd_base.h\"\n\nDISPATCH\n")
		);
	}

	#[test]
	fn destination_kind_selects_layout() {
		let dir = tempfile::tempdir().unwrap();
		assert_eq!(Layout::for_destination(dir.path()), Layout::Split(dir.path().to_path_buf()));
		let file = dir.path().join("icd.h");
		assert_eq!(Layout::for_destination(&file), Layout::Single(file.clone()));
	}
}
