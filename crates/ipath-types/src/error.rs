use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid content identifier {text:?}: {reason}")]
    InvalidCid { text: String, reason: String },

    #[error("invalid multihash (code {code:#x}): {reason}")]
    InvalidMultihash { code: u64, reason: String },
}
