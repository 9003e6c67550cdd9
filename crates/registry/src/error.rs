//! Error types for registry loading and record extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort registry processing.
///
/// Records the model simply does not apply to (unresolvable aliases,
/// restricted-profile commands) never surface here.
#[derive(Debug, Error)]
pub enum RegistryError {
	/// The registry file could not be read.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the registry document.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The registry is not a well-formed XML document.
	#[error("failed to parse {path}: {error}")]
	Xml {
		/// Path (or `<inline>` marker) of the document.
		path: PathBuf,
		/// The underlying parse failure.
		error: XmlError,
	},

	/// A node does not have the shape the command model relies on.
	#[error("malformed registry: {0}")]
	Malformed(String),
}

/// Failures while building the element tree.
#[derive(Debug, Error)]
pub enum XmlError {
	#[error("syntax error at byte {position}: {source}")]
	Syntax {
		position: usize,
		#[source]
		source: quick_xml::Error,
	},
	#[error("invalid character data: {0}")]
	Content(#[from] quick_xml::Error),
	#[error("invalid attribute: {0}")]
	Attribute(#[from] quick_xml::events::attributes::AttrError),
	#[error("invalid UTF-8 in CDATA section: {0}")]
	Utf8(#[from] std::string::FromUtf8Error),
	#[error("element <{0}> is never closed")]
	Unclosed(String),
	#[error("closing tag </{0}> has no matching start tag")]
	UnexpectedClose(String),
	#[error("second root element <{0}>")]
	MultipleRoots(String),
	#[error("document has no root element")]
	NoRoot,
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
