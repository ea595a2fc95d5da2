//! Content-addressed block storage for ipath.
//!
//! A block is an immutable byte string keyed by its [`Cid`](ipath_types::Cid).
//! The path resolver only needs to read blocks, through [`BlockSource`];
//! writers additionally implement [`BlockStore`].
//!
//! # Storage Backends
//!
//! - [`InMemoryBlockStore`] -- `HashMap`-based store for tests and embedding
//! - [`FsBlockStore`] -- one file per block under a root directory
//!
//! # Design Rules
//!
//! 1. Blocks are immutable once written; re-writing a present block is a no-op.
//! 2. The store never interprets or verifies block contents. Verification
//!    belongs to the codec registry.
//! 3. A missing block is [`StoreError::NotFound`]; every other failure is
//!    propagated as-is.

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsBlockStore;
pub use memory::InMemoryBlockStore;
pub use traits::{BlockSource, BlockStore};
