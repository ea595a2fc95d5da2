use ipath_codec::CodecError;
use ipath_names::NameError;
use ipath_store::StoreError;
use ipath_types::{Cid, TypeError};
use thiserror::Error;

use crate::dead_end::DeadEndError;

/// Errors from path and name resolution.
///
/// Collaborator errors are wrapped transparently: their message is unchanged
/// and the original error is reachable by matching the variant.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A naming-key identifier was passed where a block identifier is needed.
    #[error("{cid} is a naming key, not a block; resolve it as a name first")]
    NamingIdentifier { cid: Cid },

    #[error(transparent)]
    DeadEnd(#[from] DeadEndError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Name(#[from] NameError),

    #[error(transparent)]
    Parse(#[from] TypeError),

    /// The name resolver finished without producing any value.
    #[error("name resolution for {path} produced no value")]
    EmptyResolution { path: String },

    /// The name resolver's final value is outside the expected namespace.
    #[error("resolved value {value:?} is not under {prefix}")]
    UnexpectedNamespace { value: String, prefix: &'static str },

    #[error("invalid content path {path:?}: {reason}")]
    InvalidContentPath { path: String, reason: String },

    /// Traversal would visit more blocks than allowed.
    #[error("resolution exceeded {limit} blocks at {cid}")]
    DepthExceeded { limit: usize, cid: Cid },

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Coarse classification of a [`ResolveError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed an identifier the operation does not accept.
    Precondition,
    /// The path does not exist in the graph.
    DeadEnd,
    /// Storage, decoding, or name service failure. May succeed on retry.
    Collaborator,
    /// Malformed identifier, name, path, or configuration text.
    Parse,
    /// A resource bound was hit.
    Limit,
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NamingIdentifier { .. } => ErrorKind::Precondition,
            Self::DeadEnd(_) => ErrorKind::DeadEnd,
            Self::Name(NameError::InvalidName { .. } | NameError::InvalidPath { .. }) => {
                ErrorKind::Parse
            }
            Self::Store(_) | Self::Codec(_) | Self::Name(_) | Self::EmptyResolution { .. } => {
                ErrorKind::Collaborator
            }
            Self::Parse(_)
            | Self::UnexpectedNamespace { .. }
            | Self::InvalidContentPath { .. }
            | Self::Config(_) => ErrorKind::Parse,
            Self::DepthExceeded { .. } => ErrorKind::Limit,
        }
    }

    /// The dead end, if this is one.
    pub fn as_dead_end(&self) -> Option<&DeadEndError> {
        match self {
            Self::DeadEnd(d) => Some(d),
            _ => None,
        }
    }
}

/// Result alias for resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;
    use ipath_types::{cid_from_digest, codes};

    fn cid() -> Cid {
        cid_from_digest(codes::LIBP2P_KEY, codes::SHA2_256, &[1u8; 32]).unwrap()
    }

    #[test]
    fn kinds() {
        assert_eq!(
            ResolveError::NamingIdentifier { cid: cid() }.kind(),
            ErrorKind::Precondition
        );
        assert_eq!(
            ResolveError::from(DeadEndError::new("x", cid(), &["a"])).kind(),
            ErrorKind::DeadEnd
        );
        assert_eq!(
            ResolveError::from(StoreError::NotFound(cid())).kind(),
            ErrorKind::Collaborator
        );
        assert_eq!(
            ResolveError::from(CodecError::UnknownCodec(1)).kind(),
            ErrorKind::Collaborator
        );
        assert_eq!(
            ResolveError::from(NameError::NotFound { name: "n".into() }).kind(),
            ErrorKind::Collaborator
        );
        assert_eq!(
            ResolveError::from(NameError::InvalidName {
                name: "a b".into(),
                reason: "space".into()
            })
            .kind(),
            ErrorKind::Parse
        );
        assert_eq!(
            ResolveError::DepthExceeded { limit: 1, cid: cid() }.kind(),
            ErrorKind::Limit
        );
    }

    #[test]
    fn collaborator_messages_pass_through() {
        let inner = StoreError::NotFound(cid());
        let expected = inner.to_string();
        assert_eq!(ResolveError::from(inner).to_string(), expected);
    }

    #[test]
    fn as_dead_end() {
        let err = ResolveError::from(DeadEndError::new("x", cid(), &["a"]));
        assert_eq!(err.as_dead_end().map(DeadEndError::at), Some("a"));
        assert!(ResolveError::Config("bad".into()).as_dead_end().is_none());
    }
}
