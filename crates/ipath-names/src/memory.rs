//! In-memory name resolver.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use futures::stream::{self, BoxStream, StreamExt};
use tokio::time::Instant;
use tracing::debug;

use crate::error::{NameError, NameResult};
use crate::names::{strip_naming_prefix, validate_name};
use crate::traits::{NameResolveOptions, NameResolver};

/// Default limit on indirections followed by one resolution.
pub const DEFAULT_MAX_HOPS: usize = 32;

/// In-memory name records.
///
/// Each record maps a name to a path (`/ipns/<other>` for an indirection, or
/// any other path as a terminal value). Resolution follows records while the
/// current value is a naming path with a published record. An optional
/// per-hop latency simulates a remote lookup.
pub struct InMemoryNameResolver {
    records: RwLock<HashMap<String, String>>,
    max_hops: usize,
    hop_latency: Option<Duration>,
}

impl InMemoryNameResolver {
    /// Create an empty resolver with the default hop limit.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            max_hops: DEFAULT_MAX_HOPS,
            hop_latency: None,
        }
    }

    /// Set the maximum number of hops per resolution.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Delay every lookup by `latency`.
    pub fn with_hop_latency(mut self, latency: Duration) -> Self {
        self.hop_latency = Some(latency);
        self
    }

    /// Publish (create or replace) a record.
    ///
    /// `value` must be an absolute path.
    pub fn publish(&self, name: &str, value: impl Into<String>) -> NameResult<()> {
        validate_name(name)?;
        let value = value.into();
        if !value.starts_with('/') {
            return Err(NameError::InvalidPath {
                path: value,
                reason: "record values must be absolute paths".into(),
            });
        }
        debug!(name, value = %value, "published name record");
        self.records
            .write()
            .expect("lock poisoned")
            .insert(name.to_string(), value);
        Ok(())
    }

    /// Remove a record. Returns `true` if it existed.
    pub fn unpublish(&self, name: &str) -> bool {
        self.records
            .write()
            .expect("lock poisoned")
            .remove(name)
            .is_some()
    }

    /// The current value of a record.
    pub fn record(&self, name: &str) -> Option<String> {
        self.records.read().expect("lock poisoned").get(name).cloned()
    }

    /// Number of published records.
    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no records are published.
    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }

    /// Look up the record behind `path`.
    ///
    /// `Ok(None)` means `path` is terminal: it is not the first hop and has no
    /// record behind it.
    async fn hop(
        &self,
        path: &str,
        hops: usize,
        deadline: Option<(Instant, Duration)>,
    ) -> NameResult<Option<String>> {
        let name = strip_naming_prefix(path).ok_or_else(|| NameError::InvalidPath {
            path: path.to_string(),
            reason: "missing /ipns/ prefix".into(),
        })?;

        if let Some(latency) = self.hop_latency {
            match deadline {
                Some((at, timeout)) => tokio::time::timeout_at(at, tokio::time::sleep(latency))
                    .await
                    .map_err(|_| NameError::Timeout {
                        path: path.to_string(),
                        timeout,
                    })?,
                None => tokio::time::sleep(latency).await,
            }
        }
        if let Some((at, timeout)) = deadline {
            if Instant::now() >= at {
                return Err(NameError::Timeout {
                    path: path.to_string(),
                    timeout,
                });
            }
        }

        let value = self.record(name);
        match value {
            Some(_) if hops >= self.max_hops => Err(NameError::TooManyHops {
                name: name.to_string(),
                limit: self.max_hops,
            }),
            Some(value) => Ok(Some(value)),
            None if hops == 0 => Err(NameError::NotFound {
                name: name.to_string(),
            }),
            None => Ok(None),
        }
    }
}

impl Default for InMemoryNameResolver {
    fn default() -> Self {
        Self::new()
    }
}

struct HopState {
    current: String,
    hops: usize,
    finished: bool,
}

impl NameResolver for InMemoryNameResolver {
    fn resolve(&self, path: &str, options: NameResolveOptions) -> BoxStream<'_, NameResult<String>> {
        let deadline = options.timeout.map(|t| (Instant::now() + t, t));
        let start = HopState {
            current: path.to_string(),
            hops: 0,
            finished: false,
        };

        stream::unfold(start, move |mut state| async move {
            if state.finished {
                return None;
            }
            match self.hop(&state.current, state.hops, deadline).await {
                Ok(Some(value)) => {
                    debug!(from = %state.current, to = %value, hop = state.hops, "name hop");
                    state.hops += 1;
                    state.finished =
                        !options.recursive || strip_naming_prefix(&value).is_none();
                    state.current = value.clone();
                    Some((Ok(value), state))
                }
                Ok(None) => None,
                Err(e) => {
                    state.finished = true;
                    Some((Err(e), state))
                }
            }
        })
        .boxed()
    }
}

impl std::fmt::Debug for InMemoryNameResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryNameResolver")
            .field("record_count", &self.len())
            .field("max_hops", &self.max_hops)
            .finish()
    }
}
