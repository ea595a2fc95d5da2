use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use ipath_types::Cid;

use crate::error::{StoreError, StoreResult};
use crate::traits::{BlockSource, BlockStore};

/// In-memory, HashMap-based block store.
///
/// Intended for tests and embedding. Blocks are held behind a `RwLock` for
/// safe concurrent access; `Bytes` clones are reference-counted. The store
/// counts `get` calls so callers can observe how many blocks a traversal
/// fetched.
pub struct InMemoryBlockStore {
    blocks: RwLock<HashMap<Cid, Bytes>>,
    reads: AtomicU64,
}

impl InMemoryBlockStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            blocks: RwLock::new(HashMap::new()),
            reads: AtomicU64::new(0),
        }
    }

    /// Number of blocks currently stored.
    pub fn len(&self) -> usize {
        self.blocks.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored blocks.
    pub fn total_bytes(&self) -> u64 {
        self.blocks
            .read()
            .expect("lock poisoned")
            .values()
            .map(|b| b.len() as u64)
            .sum()
    }

    /// Number of `get` calls served so far, hits and misses alike.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Remove all blocks from the store.
    pub fn clear(&self) {
        self.blocks.write().expect("lock poisoned").clear();
    }

    /// Insert a block synchronously. Same semantics as [`BlockStore::put`].
    pub fn insert(&self, cid: Cid, data: impl Into<Bytes>) {
        self.blocks
            .write()
            .expect("lock poisoned")
            .entry(cid)
            .or_insert_with(|| data.into());
    }

    /// All identifiers in the store, sorted.
    pub fn all_cids(&self) -> Vec<Cid> {
        let map = self.blocks.read().expect("lock poisoned");
        let mut cids: Vec<Cid> = map.keys().copied().collect();
        cids.sort();
        cids
    }
}

impl Default for InMemoryBlockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlockSource for InMemoryBlockStore {
    async fn get(&self, cid: &Cid) -> StoreResult<Bytes> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let map = self.blocks.read().expect("lock poisoned");
        map.get(cid).cloned().ok_or(StoreError::NotFound(*cid))
    }

    async fn has(&self, cid: &Cid) -> StoreResult<bool> {
        let map = self.blocks.read().expect("lock poisoned");
        Ok(map.contains_key(cid))
    }
}

#[async_trait]
impl BlockStore for InMemoryBlockStore {
    async fn put(&self, cid: Cid, data: Bytes) -> StoreResult<()> {
        self.insert(cid, data);
        Ok(())
    }

    async fn delete(&self, cid: &Cid) -> StoreResult<bool> {
        let mut map = self.blocks.write().expect("lock poisoned");
        Ok(map.remove(cid).is_some())
    }
}

impl std::fmt::Debug for InMemoryBlockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlockStore")
            .field("block_count", &self.len())
            .field("reads", &self.reads())
            .finish()
    }
}
