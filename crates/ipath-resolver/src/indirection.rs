//! Resolution of mutable names to content identifiers.

use std::fmt;
use std::time::Duration;

use futures::StreamExt;
use ipath_names::{naming_path, strip_naming_prefix, NameResolveOptions, NAMING_PREFIX};
use ipath_types::{parse_cid, Cid};
use tracing::{debug, trace};

use crate::error::{ResolveError, ResolveResult};
use crate::resolver::PathResolver;

/// A mutable name, given either as an identifier or as text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Name {
    Cid(Cid),
    Text(String),
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cid(cid) => write!(f, "{cid}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<Cid> for Name {
    fn from(cid: Cid) -> Self {
        Self::Cid(cid)
    }
}

impl From<&Cid> for Name {
    fn from(cid: &Cid) -> Self {
        Self::Cid(*cid)
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Name {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl PathResolver {
    /// Resolve a mutable name to the content identifier it currently points
    /// at.
    ///
    /// The name resolver is asked for a recursive resolution of
    /// `/ipns/<name>`; every value it yields but the last is an intermediate
    /// hop. The last value must be `/ipns/<cid>`.
    ///
    /// `timeout` overrides the configured `indirection_timeout_ms` and is
    /// enforced by the name resolver.
    pub async fn resolve_indirection(
        &self,
        name: impl Into<Name>,
        timeout: Option<Duration>,
    ) -> ResolveResult<Cid> {
        let name = name.into();
        let path = naming_path(&name.to_string())?;
        let options = NameResolveOptions {
            recursive: true,
            timeout: timeout.or_else(|| self.config.indirection_timeout()),
        };

        let mut hops = self.names.resolve(&path, options);
        let mut last = None;
        while let Some(item) = hops.next().await {
            let value = item?;
            trace!(%path, hop = %value, "name hop");
            last = Some(value);
        }

        let value = last.ok_or_else(|| ResolveError::EmptyResolution { path: path.clone() })?;
        let text = strip_naming_prefix(&value).ok_or_else(|| {
            ResolveError::UnexpectedNamespace {
                value: value.clone(),
                prefix: NAMING_PREFIX,
            }
        })?;
        let cid = parse_cid(text)?;
        debug!(%path, %cid, "resolved name");
        Ok(cid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::error::ErrorKind;
    use crate::test_support::Fixture;
    use futures::stream::{self, BoxStream};
    use ipath_names::{NameError, NameResult, NameResolver};
    use ipath_store::InMemoryBlockStore;
    use ipath_types::Value;
    use std::sync::{Arc, Mutex};

    /// Yields a fixed sequence and records what it was asked.
    struct FixedNames {
        values: Vec<NameResult<String>>,
        seen: Mutex<Vec<(String, NameResolveOptions)>>,
    }

    impl FixedNames {
        fn new(values: Vec<NameResult<String>>) -> Self {
            Self {
                values,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn ok(values: &[&str]) -> Self {
            Self::new(values.iter().map(|v| Ok(v.to_string())).collect())
        }

        fn seen(&self) -> Vec<(String, NameResolveOptions)> {
            self.seen.lock().expect("lock poisoned").clone()
        }
    }

    impl NameResolver for FixedNames {
        fn resolve(
            &self,
            path: &str,
            options: NameResolveOptions,
        ) -> BoxStream<'_, NameResult<String>> {
            self.seen
                .lock()
                .expect("lock poisoned")
                .push((path.to_string(), options));
            stream::iter(self.values.clone()).boxed()
        }
    }

    fn resolver_with(names: Arc<FixedNames>) -> PathResolver {
        PathResolver::new(Arc::new(InMemoryBlockStore::new()), names)
    }

    #[tokio::test]
    async fn keeps_only_the_last_hop() {
        let fx = Fixture::new();
        let target = fx.put_json(Value::from("target")).await;
        let names = Arc::new(FixedNames::ok(&[
            "/ipns/intermediate",
            format!("/ipns/{target}").as_str(),
        ]));
        let resolver = resolver_with(names.clone());

        let cid = resolver.resolve_indirection("example.name", None).await.unwrap();
        assert_eq!(cid, target);

        let seen = names.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "/ipns/example.name");
        assert!(seen[0].1.recursive);
        assert_eq!(seen[0].1.timeout, None);
    }

    #[tokio::test]
    async fn follows_published_records() {
        let fx = Fixture::new();
        let target = fx.put_json(Value::from(1i64)).await;
        fx.names.publish("alias", "/ipns/example.name").unwrap();
        fx.names
            .publish("example.name", format!("/ipns/{target}"))
            .unwrap();

        let cid = fx.resolver.resolve_indirection("alias", None).await.unwrap();
        assert_eq!(cid, target);
    }

    #[tokio::test]
    async fn identifier_names_use_their_text_form() {
        let fx = Fixture::new();
        let key = fx.put_raw(b"key").await;
        let target = fx.put_raw(b"target").await;
        let names = Arc::new(FixedNames::ok(&[format!("/ipns/{target}").as_str()]));
        let resolver = resolver_with(names.clone());

        assert_eq!(resolver.resolve_indirection(key, None).await.unwrap(), target);
        assert_eq!(names.seen()[0].0, format!("/ipns/{key}"));
    }

    #[tokio::test]
    async fn empty_sequence_is_an_error() {
        let resolver = resolver_with(Arc::new(FixedNames::ok(&[])));
        let err = resolver.resolve_indirection("example.name", None).await.unwrap_err();
        assert!(matches!(err, ResolveError::EmptyResolution { ref path } if path == "/ipns/example.name"));
        assert_eq!(err.kind(), ErrorKind::Collaborator);
    }

    #[tokio::test]
    async fn final_value_outside_namespace() {
        let fx = Fixture::new();
        let target = fx.put_raw(b"x").await;
        let resolver = resolver_with(Arc::new(FixedNames::ok(&[format!("/ipfs/{target}").as_str()])));
        let err = resolver.resolve_indirection("example.name", None).await.unwrap_err();
        assert!(matches!(err, ResolveError::UnexpectedNamespace { .. }));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn final_value_that_is_not_an_identifier() {
        let resolver = resolver_with(Arc::new(FixedNames::ok(&["/ipns/not-a-cid"])));
        let err = resolver.resolve_indirection("example.name", None).await.unwrap_err();
        assert!(matches!(err, ResolveError::Parse(_)));
    }

    #[tokio::test]
    async fn resolver_errors_pass_through() {
        let names = FixedNames::new(vec![
            Ok("/ipns/intermediate".into()),
            Err(NameError::NotFound {
                name: "intermediate".into(),
            }),
        ]);
        let resolver = resolver_with(Arc::new(names));
        let err = resolver.resolve_indirection("example.name", None).await.unwrap_err();
        assert!(matches!(err, ResolveError::Name(NameError::NotFound { .. })));
    }

    #[tokio::test]
    async fn invalid_names_are_rejected_before_lookup() {
        let names = Arc::new(FixedNames::ok(&["/ipns/unused"]));
        let resolver = resolver_with(names.clone());
        let err = resolver.resolve_indirection("a/b", None).await.unwrap_err();
        assert!(matches!(err, ResolveError::Name(NameError::InvalidName { .. })));
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(names.seen().is_empty());
    }

    #[tokio::test]
    async fn configured_timeout_is_the_default() {
        let names = Arc::new(FixedNames::ok(&[]));
        let config = ResolverConfig {
            indirection_timeout_ms: Some(1500),
            ..ResolverConfig::default()
        };
        let resolver = resolver_with(names.clone()).with_config(config);

        let _ = resolver.resolve_indirection("a", None).await;
        let _ = resolver
            .resolve_indirection("b", Some(Duration::from_millis(10)))
            .await;

        let seen = names.seen();
        assert_eq!(seen[0].1.timeout, Some(Duration::from_millis(1500)));
        assert_eq!(seen[1].1.timeout, Some(Duration::from_millis(10)));
    }

    #[tokio::test]
    async fn slow_resolution_times_out() {
        let fx = Fixture::new();
        let target = fx.put_raw(b"x").await;
        let names = Arc::new(
            ipath_names::InMemoryNameResolver::new().with_hop_latency(Duration::from_millis(200)),
        );
        names.publish("slow", format!("/ipns/{target}")).unwrap();
        let resolver = PathResolver::new(fx.store.clone(), names);

        let err = resolver
            .resolve_indirection("slow", Some(Duration::from_millis(20)))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Name(NameError::Timeout { .. })));
    }
}
