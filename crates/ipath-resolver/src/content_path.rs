//! Namespaced content paths: `/ipfs/<cid>/...` and `/ipns/<name>/...`.

use std::fmt;
use std::str::FromStr;

use ipath_names::validate_name;
use ipath_types::{join_segments, parse_cid, split_path, Cid};

use crate::error::{ResolveError, ResolveResult};
use crate::resolver::{PathResolver, ResolutionResult};

/// A parsed content path.
///
/// A path without a namespace whose first segment is an identifier is
/// treated as immutable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentPath {
    /// `/ipfs/<cid>/<path>`
    Immutable { cid: Cid, path: String },
    /// `/ipns/<name>/<path>`
    Mutable { name: String, path: String },
}

impl ContentPath {
    pub fn parse(text: &str) -> ResolveResult<Self> {
        let invalid = |reason: &str| ResolveError::InvalidContentPath {
            path: text.to_string(),
            reason: reason.to_string(),
        };

        let segments = split_path(text);
        match segments.as_slice() {
            [] => Err(invalid("path is empty")),
            ["ipfs"] => Err(invalid("missing identifier after /ipfs")),
            ["ipns"] => Err(invalid("missing name after /ipns")),
            ["ipfs", cid, rest @ ..] => Ok(Self::Immutable {
                cid: parse_cid(cid)?,
                path: join_segments(rest),
            }),
            ["ipns", name, rest @ ..] => {
                validate_name(name)?;
                Ok(Self::Mutable {
                    name: name.to_string(),
                    path: join_segments(rest),
                })
            }
            [first, rest @ ..] => match parse_cid(first) {
                Ok(cid) => Ok(Self::Immutable {
                    cid,
                    path: join_segments(rest),
                }),
                Err(_) => Err(invalid("expected /ipfs/<cid> or /ipns/<name>")),
            },
        }
    }

    /// The path within the root block.
    pub fn path(&self) -> &str {
        match self {
            Self::Immutable { path, .. } | Self::Mutable { path, .. } => path,
        }
    }

    pub fn is_mutable(&self) -> bool {
        matches!(self, Self::Mutable { .. })
    }
}

impl FromStr for ContentPath {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ContentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (namespace, root, path) = match self {
            Self::Immutable { cid, path } => ("ipfs", cid.to_string(), path),
            Self::Mutable { name, path } => ("ipns", name.clone(), path),
        };
        write!(f, "/{namespace}/{root}")?;
        if !path.is_empty() {
            write!(f, "/{path}")?;
        }
        Ok(())
    }
}

impl PathResolver {
    /// Resolve a namespaced content path.
    ///
    /// Mutable paths resolve their name first with the configured
    /// indirection timeout.
    pub async fn resolve_content_path(&self, text: &str) -> ResolveResult<ResolutionResult> {
        match ContentPath::parse(text)? {
            ContentPath::Immutable { cid, path } => self.resolve(&cid, &path).await,
            ContentPath::Mutable { name, path } => {
                let cid = self.resolve_indirection(name, None).await?;
                self.resolve(&cid, &path).await
            }
        }
    }
}
