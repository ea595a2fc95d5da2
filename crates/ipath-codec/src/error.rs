use cid::Cid;
use ipath_types::TypeError;

/// Errors from encoding, decoding, or hashing blocks.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// No codec is registered for this code.
    #[error("no codec registered for code {0:#x}")]
    UnknownCodec(u64),

    /// No hasher is registered for this multihash code.
    #[error("no hasher registered for multihash code {0:#x}")]
    UnknownHasher(u64),

    /// The bytes are not a valid encoding for the codec.
    #[error("malformed {codec} block: {reason}")]
    Malformed { codec: &'static str, reason: String },

    /// The value cannot be represented by the codec.
    #[error("cannot encode {kind} as {codec}: {reason}")]
    Unencodable {
        codec: &'static str,
        kind: &'static str,
        reason: String,
    },

    /// The bytes hash to a different identifier than the one requested.
    #[error("digest mismatch: expected {expected}, computed {computed}")]
    DigestMismatch { expected: Cid, computed: Cid },

    /// An embedded or derived identifier is invalid.
    #[error(transparent)]
    Identifier(#[from] TypeError),
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
