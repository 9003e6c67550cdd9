//! Vulkan API registry model for the mock ICD generator.
//!
//! The registry (`vk.xml`) is parsed once into an immutable element tree and
//! indexed by [`RegistrySpec`]. Every `<command>` record is then turned into a
//! [`Command`] and partitioned by [`GroupedCommands`] into handle and extension
//! buckets, which is the shape every emitter pass walks.
//!
//! # Pipeline
//!
//! ```text
//! vk.xml -> xml::parse -> RegistrySpec -> CommandSet -> GroupedCommands
//! ```
//!
//! Per-record misses (an alias whose target is not in the loaded registry, a
//! command that only exists in the restricted profile) are values, not errors.
//! [`RegistryError`] is reserved for documents that cannot be read or whose
//! structure does not match the model.

mod error;
mod group;
mod model;
mod spec;
pub mod xml;

pub use error::{RegistryError, Result, XmlError};
pub use group::{Bucket, ExtensionBuckets, GroupedCommands, HandleGroup};
pub use model::{
	Command, CommandSet, DEVICE_PROC_ADDR, Extraction, INSTANCE_PROC_ADDR, Parameter, UNIVERSAL_COMMANDS,
};
pub use spec::{HandleKind, RESTRICTED_PROFILE, RegistrySpec};
