//! Shared fixtures for resolver tests.

use std::sync::Arc;

use ipath_names::InMemoryNameResolver;
use ipath_store::InMemoryBlockStore;
use ipath_types::{codes, Cid, Link, LinkedNode, NodeValue, Value};

use crate::blocks::put_node;
use crate::resolver::PathResolver;

pub(crate) struct Fixture {
    pub store: Arc<InMemoryBlockStore>,
    pub names: Arc<InMemoryNameResolver>,
    pub resolver: PathResolver,
}

impl Fixture {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryBlockStore::new());
        let names = Arc::new(InMemoryNameResolver::new());
        let resolver = PathResolver::new(store.clone(), names.clone());
        Self {
            store,
            names,
            resolver,
        }
    }

    async fn put(&self, value: NodeValue, codec: u64) -> Cid {
        put_node(
            self.store.as_ref(),
            self.resolver.registry(),
            &value,
            codec,
            codes::SHA2_256,
        )
        .await
        .expect("fixture node encodes")
    }

    /// Store a generic node as dag-json.
    pub async fn put_json(&self, value: Value) -> Cid {
        self.put(value.into(), codes::DAG_JSON).await
    }

    /// Store JSON text verbatim under the plain `json` codec.
    pub fn put_json_text(&self, text: &str) -> Cid {
        let cid = self
            .resolver
            .registry()
            .cid_for(codes::JSON, codes::SHA2_256, text.as_bytes())
            .expect("json codec registered");
        self.store.insert(cid, text.as_bytes().to_vec());
        cid
    }

    /// Store a linked-file node with one named link per entry.
    pub async fn put_dir(&self, entries: &[(&str, Cid)]) -> Cid {
        let links = entries
            .iter()
            .map(|(name, target)| Link::named(*name, *target, None))
            .collect();
        self.put(LinkedNode::new(links, None).into(), codes::DAG_PB).await
    }

    pub async fn put_linked(&self, node: LinkedNode) -> Cid {
        self.put(node.into(), codes::DAG_PB).await
    }

    pub async fn put_raw(&self, bytes: &[u8]) -> Cid {
        self.put(Value::Bytes(bytes.to_vec()).into(), codes::RAW).await
    }
}
