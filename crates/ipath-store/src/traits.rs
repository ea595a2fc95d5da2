use async_trait::async_trait;
use bytes::Bytes;
use ipath_types::Cid;

use crate::error::{StoreError, StoreResult};

/// Read access to content-addressed blocks.
///
/// Implementations must be safe to share across tasks. Reads of the same
/// identifier always return the same bytes (content-addressing guarantees
/// this for honest stores).
#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Fetch the raw bytes of a block.
    ///
    /// Returns [`StoreError::NotFound`] if the block is not available.
    async fn get(&self, cid: &Cid) -> StoreResult<Bytes>;

    /// Check whether a block is available.
    ///
    /// Default implementation calls `get()` and maps `NotFound` to `false`.
    async fn has(&self, cid: &Cid) -> StoreResult<bool> {
        match self.get(cid).await {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Read/write block storage.
#[async_trait]
pub trait BlockStore: BlockSource {
    /// Store a block under `cid`.
    ///
    /// If the block already exists, this is a no-op (idempotent). The store
    /// does not check that `data` hashes to `cid`.
    async fn put(&self, cid: Cid, data: Bytes) -> StoreResult<()>;

    /// Delete a block. Returns `true` if the block existed.
    async fn delete(&self, cid: &Cid) -> StoreResult<bool>;

    /// Store several blocks.
    ///
    /// Default implementation calls `put()` for each block in order.
    async fn put_many(&self, blocks: Vec<(Cid, Bytes)>) -> StoreResult<()> {
        for (cid, data) in blocks {
            self.put(cid, data).await?;
        }
        Ok(())
    }
}
