//! C++ mock ICD emitter.
//!
//! Turns [`GroupedCommands`] into the headers a mock Vulkan driver is built
//! from:
//!
//! * `vkmock::<Handle>Base` override bases with default bodies,
//! * the `vkmock::MockFunctions` function-pointer table,
//! * `<Handle>_T` owning objects that forward to their base,
//! * free routing functions plus `vkGetInstanceProcAddr` and
//!   `vkGetDeviceProcAddr`.
//!
//! Rendering is pure and deterministic; [`publish`] makes the result visible
//! on disk atomically.

mod error;
mod layout;
mod passes;
mod publish;
mod writer;

use std::path::{Path, PathBuf};

use icdgen_registry::GroupedCommands;
use tracing::info;

pub use error::{EmitError, Result};
pub use layout::{Artifact, BASE_HEADER, DISPATCH_HEADER, Layout, Sources};
pub use publish::publish;

/// Runs every pass over `grouped`.
pub fn render(grouped: &GroupedCommands<'_>) -> Result<Sources> {
	let mut declarations = String::from("namespace vkmock\n{\n\n");
	passes::base::write(&mut declarations, grouped)?;
	passes::table::write(&mut declarations, grouped)?;
	declarations.push_str("} // namespace vkmock\n\n");
	passes::object::write(&mut declarations, grouped)?;

	let mut dispatch = String::new();
	passes::routing::write(&mut dispatch, grouped)?;

	Ok(Sources { declarations, dispatch })
}

/// Renders `grouped` and publishes it at `destination`.
///
/// Returns the paths written.
pub fn generate(grouped: &GroupedCommands<'_>, destination: &Path) -> Result<Vec<PathBuf>> {
	let sources = render(grouped)?;
	let artifacts = Layout::for_destination(destination).artifacts(&sources);
	publish(&artifacts)?;
	info!(files = artifacts.len(), commands = grouped.len(), "mock ICD generated");
	Ok(artifacts.into_iter().map(|artifact| artifact.path).collect())
}
