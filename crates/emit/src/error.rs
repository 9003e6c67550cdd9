//! Error types for rendering and publishing artifacts.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while emitting generated sources.
#[derive(Debug, Error)]
pub enum EmitError {
	/// Formatting into the in-memory buffer failed.
	#[error("failed to format generated source: {0}")]
	Format(#[from] std::fmt::Error),

	/// A temporary output file could not be created or written.
	#[error("I/O error writing {path}: {error}")]
	Io {
		/// Destination the file was meant for.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The destination exists but cannot be replaced by a file.
	#[error("cannot replace {path}: not a regular file")]
	NotAFile {
		/// Destination path.
		path: PathBuf,
	},

	/// A fully written temporary file could not be moved into place.
	#[error("failed to publish {path}: {error}")]
	Persist {
		/// Destination path.
		path: PathBuf,
		/// The underlying persist error.
		error: tempfile::PersistError,
	},
}

/// Result type for emitter operations.
pub type Result<T> = std::result::Result<T, EmitError>;
