//! Dispatch table from numeric codes to codecs and hashers.

use std::collections::HashMap;
use std::sync::Arc;

use cid::Cid;
use ipath_types::{cid_from_digest, short_cid, with_version_of, DecodedNode, NodeValue};
use tracing::trace;

use crate::codec::Codec;
use crate::dag_json::{DagJsonCodec, JsonCodec};
use crate::dag_pb::DagPbCodec;
use crate::error::{CodecError, CodecResult};
use crate::hasher::{Blake3Hasher, Hasher, Sha256Hasher};
use crate::raw::RawCodec;

/// Open registry of codecs and hashers keyed by multicodec / multihash code.
///
/// Decoding re-derives the identifier from the bytes: the digest is computed
/// with the registered hasher and wrapped into a CIDv1 with the codec code.
#[derive(Clone)]
pub struct CodecRegistry {
    codecs: HashMap<u64, Arc<dyn Codec>>,
    hashers: HashMap<u64, Arc<dyn Hasher>>,
}

impl CodecRegistry {
    /// Create a registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            codecs: HashMap::new(),
            hashers: HashMap::new(),
        }
    }

    /// Create a registry with every built-in codec and hasher.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry
            .register_codec(DagPbCodec)
            .register_codec(DagJsonCodec)
            .register_codec(JsonCodec)
            .register_codec(RawCodec)
            .register_hasher(Sha256Hasher)
            .register_hasher(Blake3Hasher);
        registry
    }

    /// Register a codec, replacing any codec with the same code.
    pub fn register_codec(&mut self, codec: impl Codec + 'static) -> &mut Self {
        self.codecs.insert(codec.code(), Arc::new(codec));
        self
    }

    /// Register a hasher, replacing any hasher with the same code.
    pub fn register_hasher(&mut self, hasher: impl Hasher + 'static) -> &mut Self {
        self.hashers.insert(hasher.code(), Arc::new(hasher));
        self
    }

    /// Look up a codec by code.
    pub fn codec(&self, code: u64) -> CodecResult<&dyn Codec> {
        self.codecs
            .get(&code)
            .map(|c| c.as_ref())
            .ok_or(CodecError::UnknownCodec(code))
    }

    /// Look up a hasher by multihash code.
    pub fn hasher(&self, code: u64) -> CodecResult<&dyn Hasher> {
        self.hashers
            .get(&code)
            .map(|h| h.as_ref())
            .ok_or(CodecError::UnknownHasher(code))
    }

    /// Sorted list of registered codec codes.
    pub fn codec_codes(&self) -> Vec<u64> {
        let mut codes: Vec<u64> = self.codecs.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    /// Sorted list of registered multihash codes.
    pub fn hasher_codes(&self) -> Vec<u64> {
        let mut codes: Vec<u64> = self.hashers.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    /// Compute the CIDv1 of `bytes` under the given codec and hasher.
    ///
    /// The codec only needs to be registered, it is not invoked.
    pub fn cid_for(&self, codec: u64, hash_code: u64, bytes: &[u8]) -> CodecResult<Cid> {
        self.codec(codec)?;
        let digest = self.hasher(hash_code)?.digest(bytes);
        Ok(cid_from_digest(codec, hash_code, &digest)?)
    }

    /// Decode `bytes` and re-derive their identifier.
    pub fn decode(&self, codec: u64, hash_code: u64, bytes: &[u8]) -> CodecResult<(Cid, NodeValue)> {
        let decoder = self.codec(codec)?;
        let cid = self.cid_for(codec, hash_code, bytes)?;
        let value = decoder.decode(bytes)?;
        trace!(cid = %short_cid(&cid), codec = decoder.name(), len = bytes.len(), "decoded block");
        Ok((cid, value))
    }

    /// Decode a block fetched for `expected`, verifying that the bytes
    /// hash to it.
    ///
    /// The returned node carries the re-derived identifier, matching the
    /// version (v0/v1) of `expected`.
    pub fn decode_block(&self, expected: &Cid, bytes: &[u8]) -> CodecResult<DecodedNode> {
        let (cid, value) = self.decode(expected.codec(), expected.hash().code(), bytes)?;
        let cid = with_version_of(cid, expected);
        if cid != *expected {
            return Err(CodecError::DigestMismatch {
                expected: *expected,
                computed: cid,
            });
        }
        Ok(DecodedNode::new(cid, value))
    }

    /// Encode a node payload and compute its CIDv1.
    pub fn encode(&self, value: &NodeValue, codec: u64, hash_code: u64) -> CodecResult<(Cid, Vec<u8>)> {
        let bytes = self.codec(codec)?.encode(value)?;
        let cid = self.cid_for(codec, hash_code, &bytes)?;
        Ok((cid, bytes))
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("codecs", &self.codec_codes())
            .field("hashers", &self.hasher_codes())
            .finish()
    }
}
