//! Emitter passes.
//!
//! Each pass walks the same [`GroupedCommands`](icdgen_registry::GroupedCommands)
//! in its stable order and appends one kind of C++ declaration. A bucket that
//! belongs to an extension is always written as a single guarded region.

pub(crate) mod base;
pub(crate) mod object;
pub(crate) mod routing;
pub(crate) mod table;

#[cfg(test)]
mod tests;
