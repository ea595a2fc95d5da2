//! The path resolver.
//!
//! Resolution is a loop over blocks rather than self-recursion: each
//! iteration fetches and decodes one block, consumes path segments against
//! it, and either finishes or hands the next identifier and the unconsumed
//! segments to the following iteration. `max_depth` bounds the number of
//! iterations.

use std::sync::Arc;

use ipath_codec::CodecRegistry;
use ipath_names::NameResolver;
use ipath_store::BlockSource;
use ipath_types::{
    codes, join_segments, short_cid, split_path, Cid, DecodedNode, LinkedNode, NodeValue, Value,
};
use tracing::{debug, trace};

use crate::config::{ResolveOptions, ResolverConfig};
use crate::dead_end::DeadEndError;
use crate::error::{ResolveError, ResolveResult};

/// A successfully resolved path.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolutionResult {
    /// The value the path points at.
    pub value: NodeValue,
    /// Identifier of the block containing `value`.
    pub cid: Cid,
    /// The decoded block containing `value`.
    pub node: DecodedNode,
}

impl ResolutionResult {
    /// The value as a generic value, if it is one.
    pub fn as_value(&self) -> Option<&Value> {
        self.value.as_generic()
    }
}

/// What one block contributes to a resolution.
enum Step {
    /// Resolution ends in this block with this value.
    Done(NodeValue),
    /// Continue in `cid` with `path`.
    Next { cid: Cid, path: String },
}

/// Resolves `(cid, path)` pairs against a block source.
///
/// The resolver holds only shared, immutable collaborators; calls are
/// independent and may run concurrently.
#[derive(Clone)]
pub struct PathResolver {
    pub(crate) blocks: Arc<dyn BlockSource>,
    pub(crate) names: Arc<dyn NameResolver>,
    pub(crate) registry: Arc<CodecRegistry>,
    pub(crate) config: ResolverConfig,
}

impl PathResolver {
    /// Create a resolver with the default codec registry and configuration.
    pub fn new(blocks: Arc<dyn BlockSource>, names: Arc<dyn NameResolver>) -> Self {
        Self {
            blocks,
            names,
            registry: Arc::new(CodecRegistry::with_defaults()),
            config: ResolverConfig::default(),
        }
    }

    /// Use a custom codec registry.
    pub fn with_registry(mut self, registry: Arc<CodecRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// Fetch and decode a single block.
    ///
    /// Naming-key identifiers are rejected. Store and codec errors are
    /// returned unchanged.
    pub async fn get_node(&self, cid: &Cid) -> ResolveResult<DecodedNode> {
        if cid.codec() == codes::LIBP2P_KEY {
            return Err(ResolveError::NamingIdentifier { cid: *cid });
        }
        let bytes = self.blocks.get(cid).await?;
        Ok(self.registry.decode_block(cid, &bytes)?)
    }

    /// Resolve `path` from `cid` with the configured default options.
    pub async fn resolve(&self, cid: &Cid, path: &str) -> ResolveResult<ResolutionResult> {
        self.resolve_with(cid, path, &self.config.resolve).await
    }

    /// Resolve `path` from `cid`.
    ///
    /// An empty path (or one made only of slashes) returns the decoded block
    /// itself.
    pub async fn resolve_with(
        &self,
        cid: &Cid,
        path: &str,
        options: &ResolveOptions,
    ) -> ResolveResult<ResolutionResult> {
        let mut cid = *cid;
        let mut path = path.to_string();
        let mut depth = 0;

        loop {
            if cid.codec() == codes::LIBP2P_KEY {
                return Err(ResolveError::NamingIdentifier { cid });
            }
            if depth >= options.max_depth {
                return Err(ResolveError::DepthExceeded {
                    limit: options.max_depth,
                    cid,
                });
            }
            depth += 1;

            let node = self.get_node(&cid).await?;
            let segments = split_path(&path);
            if segments.is_empty() {
                trace!(cid = %short_cid(&node.cid), depth, "path exhausted");
                return Ok(ResolutionResult {
                    value: node.value.clone(),
                    cid: node.cid,
                    node,
                });
            }

            let step = match &node.value {
                NodeValue::Linked(linked) => step_linked(linked, &node.cid, &segments, options)?,
                NodeValue::Generic(root) => step_generic(root, &node.cid, &segments, options)?,
            };

            match step {
                Step::Done(value) => {
                    return Ok(ResolutionResult {
                        value,
                        cid: node.cid,
                        node,
                    })
                }
                Step::Next { cid: next, path: rest } => {
                    cid = next;
                    path = rest;
                }
            }
        }
    }
}

/// Consume one segment against a linked-file node.
fn step_linked(
    node: &LinkedNode,
    cid: &Cid,
    segments: &[&str],
    options: &ResolveOptions,
) -> ResolveResult<Step> {
    if !options.follow_linked_nodes {
        return Err(DeadEndError::new(
            "node is a linked-file node, but following is disabled",
            *cid,
            segments,
        )
        .into());
    }

    let name = segments[0];
    let link = node.find(name).ok_or_else(|| {
        DeadEndError::new(format!("no link named {name:?}"), *cid, segments)
    })?;

    debug!(cid = %short_cid(cid), link = name, target = %link.target, "following link");
    Ok(Step::Next {
        cid: link.target,
        path: join_segments(&segments[1..]),
    })
}

/// Walk segments through a generic node's value tree.
///
/// Stops early when the selected value is an embedded identifier; the
/// segments after the one that selected it are resolved in the linked block.
fn step_generic(
    root: &Value,
    cid: &Cid,
    segments: &[&str],
    options: &ResolveOptions,
) -> ResolveResult<Step> {
    if !options.follow_generic_nodes {
        return Err(DeadEndError::new(
            "node is a structured node, but following is disabled",
            *cid,
            segments,
        )
        .into());
    }

    let mut cursor = root;
    for (i, segment) in segments.iter().enumerate() {
        let parent = cursor;
        cursor = parent.child(segment).ok_or_else(|| {
            DeadEndError::new(
                format!(
                    "could not resolve /{} ({} has no entry {segment:?})",
                    join_segments(&segments[..=i]),
                    parent.kind()
                ),
                *cid,
                segments,
            )
        })?;

        if let Some(next) = cursor.as_embedded_cid() {
            debug!(
                cid = %short_cid(cid),
                at = %join_segments(&segments[..=i]),
                target = %next,
                "following embedded link"
            );
            return Ok(Step::Next {
                cid: next,
                path: join_segments(&segments[i + 1..]),
            });
        }
    }

    Ok(Step::Done(NodeValue::Generic(cursor.clone())))
}

impl std::fmt::Debug for PathResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathResolver")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}
