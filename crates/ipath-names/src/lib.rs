//! Mutable name resolution for ipath.
//!
//! A name record is a mutable pointer: `/ipns/<name>` maps to another path,
//! which may itself be a name (an indirection) or a terminal value. A
//! [`NameResolver`] produces the sequence of hops as a lazy stream so callers
//! can observe intermediate values or keep only the last one.
//!
//! # Modules
//!
//! - [`error`]: Error types for name resolution
//! - [`traits`]: The [`NameResolver`] trait and [`NameResolveOptions`]
//! - [`names`]: Name validation and naming-path helpers
//! - [`memory`]: In-memory [`InMemoryNameResolver`] for tests and embedding

pub mod error;
pub mod memory;
pub mod names;
pub mod traits;

pub use error::{NameError, NameResult};
pub use memory::InMemoryNameResolver;
pub use names::{naming_path, strip_naming_prefix, validate_name, NAMING_PREFIX};
pub use traits::{NameResolveOptions, NameResolver};
