//! Two-level stable partition of commands by owning handle and extension.
//!
//! Key order at both levels and command order within a bucket follow the
//! order in which commands are first encountered. Emitters rely on this so
//! every (handle, extension) bucket is written as one contiguous guarded
//! region.

use indexmap::IndexMap;

use crate::model::Command;


/// Commands of one handle, keyed by extension (`None` = core).
pub type ExtensionBuckets<'a> = IndexMap<Option<&'a str>, Vec<&'a Command>>;

/// Index over a command list; does not own the commands.
#[derive(Debug, Clone, Default)]
pub struct GroupedCommands<'a> {
	handles: IndexMap<Option<&'a str>, ExtensionBuckets<'a>>,
}

/// All buckets sharing one owning handle (`None` = global commands).
#[derive(Debug, Clone, Copy)]
pub struct HandleGroup<'g, 'a> {
	pub handle: Option<&'a str>,
	extensions: &'g ExtensionBuckets<'a>,
}

/// One leaf bucket.
#[derive(Debug, Clone, Copy)]
pub struct Bucket<'g, 'a> {
	pub handle: Option<&'a str>,
	pub extension: Option<&'a str>,
	pub commands: &'g [&'a Command],
}

impl<'a> GroupedCommands<'a> {
	/// Groups `commands`, skipping any flagged as excluded.
	pub fn new(commands: impl IntoIterator<Item = &'a Command>) -> Self {
		let mut handles: IndexMap<Option<&'a str>, ExtensionBuckets<'a>> = IndexMap::new();
		for command in commands.into_iter().filter(|c| !c.excluded) {
			handles
				.entry(command.handle.as_deref())
				.or_default()
				.entry(command.extension.as_deref())
				.or_default()
				.push(command);
		}
		Self { handles }
	}

	pub fn handles(&self) -> impl Iterator<Item = HandleGroup<'_, 'a>> {
		self.handles
			.iter()
			.map(|(handle, extensions)| HandleGroup {
				handle: *handle,
				extensions,
			})
	}

	/// Handle groups other than the global one.
	pub fn object_handles(&self) -> impl Iterator<Item = HandleGroup<'_, 'a>> {
		self.handles().filter(|group| group.handle.is_some())
	}

	/// Every leaf bucket, handle-major.
	pub fn buckets(&self) -> impl Iterator<Item = Bucket<'_, 'a>> {
		self.handles().flat_map(HandleGroup::buckets)
	}

	/// Every command in emission order.
	pub fn commands(&self) -> impl Iterator<Item = &'a Command> {
		self.buckets().flat_map(|bucket| bucket.commands.iter().copied())
	}

	pub fn len(&self) -> usize {
		self.buckets().map(|bucket| bucket.commands.len()).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.handles.is_empty()
	}
}

impl<'g, 'a> HandleGroup<'g, 'a> {
	pub fn buckets(self) -> impl Iterator<Item = Bucket<'g, 'a>> {
		let handle = self.handle;
		self.extensions
			.iter()
			.map(move |(extension, commands)| Bucket {
				handle,
				extension: *extension,
				commands: commands.as_slice(),
			})
	}

	pub fn commands(self) -> impl Iterator<Item = &'a Command> {
		self.buckets()
			.flat_map(|bucket| bucket.commands.iter().copied())
	}

	/// Command named `name` within this handle group.
	pub fn find(self, name: &str) -> Option<&'a Command> {
		self.commands().find(|command| command.name == name)
	}
}
