//! Filesystem block store: one file per block, named by the CID text form.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use ipath_types::{short_cid, Cid};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{BlockSource, BlockStore};

/// Directory-backed block store.
///
/// Writes go to a temporary file in the same directory and are renamed into
/// place, so readers never observe a partially written block.
#[derive(Debug)]
pub struct FsBlockStore {
    root: PathBuf,
    tmp_counter: AtomicU64,
}

impl FsBlockStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        let meta = tokio::fs::metadata(&root).await?;
        if !meta.is_dir() {
            return Err(StoreError::Unavailable(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        Ok(Self {
            root,
            tmp_counter: AtomicU64::new(0),
        })
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn block_path(&self, cid: &Cid) -> PathBuf {
        self.root.join(cid.to_string())
    }

    fn tmp_path(&self, cid: &Cid) -> PathBuf {
        let n = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        self.root
            .join(format!(".{}.{}.{n}.tmp", cid, std::process::id()))
    }
}

#[async_trait]
impl BlockSource for FsBlockStore {
    async fn get(&self, cid: &Cid) -> StoreResult<Bytes> {
        match tokio::fs::read(self.block_path(cid)).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(*cid)),
            Err(e) => Err(e.into()),
        }
    }

    async fn has(&self, cid: &Cid) -> StoreResult<bool> {
        Ok(tokio::fs::try_exists(self.block_path(cid)).await?)
    }
}

#[async_trait]
impl BlockStore for FsBlockStore {
    async fn put(&self, cid: Cid, data: Bytes) -> StoreResult<()> {
        let path = self.block_path(&cid);
        if tokio::fs::try_exists(&path).await? {
            return Ok(());
        }
        let tmp = self.tmp_path(&cid);
        tokio::fs::write(&tmp, &data).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        debug!(cid = %short_cid(&cid), len = data.len(), "wrote block");
        Ok(())
    }

    async fn delete(&self, cid: &Cid) -> StoreResult<bool> {
        match tokio::fs::remove_file(self.block_path(cid)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
