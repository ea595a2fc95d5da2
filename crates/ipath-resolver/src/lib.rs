//! Path resolution over content-addressed blocks.
//!
//! [`PathResolver`] turns a starting [`Cid`] and a slash-delimited path into
//! a concrete value. Each step fetches a block from a
//! [`BlockSource`](ipath_store::BlockSource), decodes it through the
//! [`CodecRegistry`](ipath_codec::CodecRegistry), and walks the path:
//!
//! - **Linked-file nodes** (`dag-pb`) consume one segment by following the
//!   first link with that name.
//! - **Generic nodes** consume segments as map keys or list indices until the
//!   path ends or the selected value is itself an identifier, in which case
//!   resolution continues in that block with the remaining segments.
//!
//! Mutable names go through [`PathResolver::resolve_indirection`] first.
//!
//! # Errors
//!
//! Every failure is a [`ResolveError`]. Structural failures are
//! [`DeadEndError`]s; storage, codec, and naming failures keep their original
//! error types so callers can tell them apart (see [`ErrorKind`]).

pub mod blocks;
pub mod config;
pub mod content_path;
pub mod dead_end;
pub mod error;
pub mod indirection;
pub mod resolver;

#[cfg(test)]
mod test_support;

pub use blocks::put_node;
pub use config::{ResolveOptions, ResolverConfig};
pub use content_path::ContentPath;
pub use dead_end::DeadEndError;
pub use error::{ErrorKind, ResolveError, ResolveResult};
pub use indirection::Name;
pub use resolver::{PathResolver, ResolutionResult};

// Re-export key types
pub use ipath_types::{Cid, DecodedNode, Link, LinkedNode, NodeValue, Value};
