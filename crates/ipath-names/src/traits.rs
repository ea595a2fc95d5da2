//! The [`NameResolver`] trait.

use std::time::Duration;

use futures::stream::BoxStream;

use crate::error::NameResult;

/// Options for a single resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameResolveOptions {
    /// Keep following indirections until a value that is not a name.
    pub recursive: bool,
    /// Deadline for the whole resolution, measured from the call.
    pub timeout: Option<Duration>,
}

impl Default for NameResolveOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            timeout: None,
        }
    }
}

/// Resolves naming paths (`/ipns/<name>`) to the values they point at.
///
/// The returned stream yields one item per hop, in order. It is finite: it
/// ends after a terminal value or after the first error. With
/// `recursive = false` it yields at most one value.
pub trait NameResolver: Send + Sync {
    fn resolve(&self, path: &str, options: NameResolveOptions) -> BoxStream<'_, NameResult<String>>;
}
