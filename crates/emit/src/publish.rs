//! All-or-nothing publication of artifacts.
//!
//! Every destination is checked and every artifact is written to a temporary
//! file next to its destination before anything is renamed into place. If a
//! rename still fails, the files already published are put back to their
//! previous contents, so a failed run never leaves a mismatched set of
//! headers behind.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{EmitError, Result};
use crate::layout::Artifact;

pub fn publish(artifacts: &[Artifact]) -> Result<()> {
	for artifact in artifacts {
		if let Ok(meta) = fs::metadata(&artifact.path)
			&& !meta.is_file()
		{
			return Err(EmitError::NotAFile {
				path: artifact.path.clone(),
			});
		}
	}

	let mut staged = Vec::with_capacity(artifacts.len());
	for artifact in artifacts {
		let io_error = |error: std::io::Error| EmitError::Io {
			path: artifact.path.clone(),
			error,
		};
		let dir = match artifact.path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent,
			_ => Path::new("."),
		};
		let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
		file.write_all(artifact.contents.as_bytes()).map_err(io_error)?;
		file.flush().map_err(io_error)?;
		debug!(path = %artifact.path.display(), bytes = artifact.contents.len(), "staged");
		staged.push((file, artifact));
	}

	let mut published: Vec<(&Artifact, Option<Vec<u8>>)> = Vec::with_capacity(staged.len());
	for (file, artifact) in staged {
		let previous = fs::read(&artifact.path).ok();
		if let Err(error) = file.persist(&artifact.path) {
			roll_back(&published);
			return Err(EmitError::Persist {
				path: artifact.path.clone(),
				error,
			});
		}
		published.push((artifact, previous));
	}

	for (artifact, _) in &published {
		info!(path = %artifact.path.display(), "wrote");
	}
	Ok(())
}

/// Restores earlier contents, or removes files that did not exist before.
fn roll_back(published: &[(&Artifact, Option<Vec<u8>>)]) {
	for (artifact, previous) in published.iter().rev() {
		let restored = match previous {
			Some(bytes) => fs::write(&artifact.path, bytes),
			None => fs::remove_file(&artifact.path),
		};
		match restored {
			Ok(()) => debug!(path = %artifact.path.display(), "rolled back"),
			Err(error) => warn!(path = %artifact.path.display(), %error, "could not roll back"),
		}
	}
}
