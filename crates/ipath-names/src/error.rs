//! Error types for name resolution.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while resolving a name.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NameError {
    /// No record is published under this name.
    #[error("name not found: {name}")]
    NotFound { name: String },

    /// The name is not acceptable as a record key.
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// The path is not a naming path.
    #[error("invalid naming path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// The chain of indirections is longer than the resolver allows.
    #[error("too many hops resolving {name}: limit is {limit}")]
    TooManyHops { name: String, limit: usize },

    /// Resolution did not finish within the caller's timeout.
    #[error("timed out after {timeout:?} resolving {path}")]
    Timeout { path: String, timeout: Duration },
}

/// Convenience type alias for name resolution.
pub type NameResult<T> = std::result::Result<T, NameError>;
