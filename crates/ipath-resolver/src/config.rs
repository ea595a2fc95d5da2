use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, ResolveResult};

/// Per-call traversal options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Traverse linked-file nodes. When `false`, a linked-file node with path
    /// left to resolve is a dead end.
    pub follow_linked_nodes: bool,
    /// Traverse generic nodes. When `false`, a generic node with path left to
    /// resolve is a dead end.
    pub follow_generic_nodes: bool,
    /// Maximum number of blocks a single resolution may fetch.
    pub max_depth: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            follow_linked_nodes: true,
            follow_generic_nodes: true,
            max_depth: 256,
        }
    }
}

/// Configuration for a [`PathResolver`](crate::PathResolver).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Timeout passed to the name resolver when the caller gives none.
    pub indirection_timeout_ms: Option<u64>,
    /// Options used by [`PathResolver::resolve`](crate::PathResolver::resolve).
    pub resolve: ResolveOptions,
}

impl ResolverConfig {
    /// Parse and validate a TOML document.
    ///
    /// ```
    /// use ipath_resolver::ResolverConfig;
    ///
    /// let config = ResolverConfig::from_toml_str(
    ///     "indirection_timeout_ms = 5000\n[resolve]\nfollow_generic_nodes = false\n",
    /// )
    /// .unwrap();
    /// assert!(!config.resolve.follow_generic_nodes);
    /// assert!(config.resolve.follow_linked_nodes);
    /// ```
    pub fn from_toml_str(text: &str) -> ResolveResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ResolveError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> ResolveResult<String> {
        toml::to_string(self).map_err(|e| ResolveError::Config(e.to_string()))
    }

    pub fn validate(&self) -> ResolveResult<()> {
        if self.resolve.max_depth == 0 {
            return Err(ResolveError::Config("resolve.max_depth must be at least 1".into()));
        }
        if self.indirection_timeout_ms == Some(0) {
            return Err(ResolveError::Config(
                "indirection_timeout_ms must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn indirection_timeout(&self) -> Option<Duration> {
        self.indirection_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_everything() {
        let config = ResolverConfig::default();
        assert!(config.resolve.follow_linked_nodes);
        assert!(config.resolve.follow_generic_nodes);
        assert_eq!(config.resolve.max_depth, 256);
        assert_eq!(config.indirection_timeout(), None);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(ResolverConfig::from_toml_str("").unwrap(), ResolverConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = ResolverConfig::from_toml_str(
            "indirection_timeout_ms = 1500\n[resolve]\nmax_depth = 8\n",
        )
        .unwrap();
        assert_eq!(config.resolve.max_depth, 8);
        assert!(config.resolve.follow_linked_nodes);
        assert_eq!(config.indirection_timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            ResolverConfig::from_toml_str("[resolve]\nmax_depth = 0\n"),
            Err(ResolveError::Config(_))
        ));
        assert!(ResolverConfig::from_toml_str("indirection_timeout_ms = 0").is_err());
        assert!(ResolverConfig::from_toml_str("[resolve]\nmax_depth = \"deep\"\n").is_err());
    }

    #[test]
    fn toml_roundtrip() {
        let config = ResolverConfig {
            indirection_timeout_ms: Some(250),
            resolve: ResolveOptions {
                follow_linked_nodes: false,
                ..Default::default()
            },
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(ResolverConfig::from_toml_str(&text).unwrap(), config);
    }
}
