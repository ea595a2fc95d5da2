use bytes::Bytes;
use ipath_codec::CodecRegistry;
use ipath_store::BlockStore;
use ipath_types::{short_cid, Cid, NodeValue};
use tracing::debug;

use crate::error::ResolveResult;

/// Encode `value` with the given codec and hasher, store it, and return its
/// identifier.
pub async fn put_node(
    store: &dyn BlockStore,
    registry: &CodecRegistry,
    value: &NodeValue,
    codec: u64,
    hash_code: u64,
) -> ResolveResult<Cid> {
    let (cid, bytes) = registry.encode(value, codec, hash_code)?;
    let len = bytes.len();
    store.put(cid, Bytes::from(bytes)).await?;
    debug!(cid = %short_cid(&cid), kind = %value.kind(), len, "stored node");
    Ok(cid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipath_store::{BlockSource, InMemoryBlockStore};
    use ipath_types::{codes, Value};

    #[tokio::test]
    async fn stored_node_decodes_back() {
        let store = InMemoryBlockStore::new();
        let registry = CodecRegistry::with_defaults();
        let value = NodeValue::Generic(Value::map([("k", Value::from("v"))]));
        let cid = put_node(&store, &registry, &value, codes::DAG_JSON, codes::BLAKE3)
            .await
            .unwrap();

        let bytes = store.get(&cid).await.unwrap();
        assert_eq!(registry.decode_block(&cid, &bytes).unwrap().value, value);
    }

    #[tokio::test]
    async fn unencodable_values_store_nothing() {
        let store = InMemoryBlockStore::new();
        let registry = CodecRegistry::with_defaults();
        let value = NodeValue::Generic(Value::from("not bytes"));
        assert!(put_node(&store, &registry, &value, codes::RAW, codes::SHA2_256)
            .await
            .is_err());
        assert!(store.is_empty());
    }
}
