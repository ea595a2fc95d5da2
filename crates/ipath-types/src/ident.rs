//! Identifier helpers layered over [`cid::Cid`].

use cid::multihash::Multihash;
use cid::{Cid, Version};

use crate::error::TypeError;

/// Parse a CID from its text form (CIDv0 base58 or multibase-prefixed CIDv1).
pub fn parse_cid(text: &str) -> Result<Cid, TypeError> {
    Cid::try_from(text).map_err(|e| TypeError::InvalidCid {
        text: text.to_string(),
        reason: e.to_string(),
    })
}

/// Build a CIDv1 from a codec code, a multihash code, and a raw digest.
pub fn cid_from_digest(codec: u64, hash_code: u64, digest: &[u8]) -> Result<Cid, TypeError> {
    let mh = Multihash::<64>::wrap(hash_code, digest).map_err(|e| {
        TypeError::InvalidMultihash {
            code: hash_code,
            reason: e.to_string(),
        }
    })?;
    Ok(Cid::new_v1(codec, mh))
}

/// Rebuild `cid` with the same version as `like`.
///
/// Decoders always derive CIDv1; a CIDv0 request must compare against a
/// CIDv0 answer. Falls back to `cid` when the conversion is not possible.
pub fn with_version_of(cid: Cid, like: &Cid) -> Cid {
    match like.version() {
        Version::V0 => Cid::new_v0(*cid.hash()).unwrap_or(cid),
        Version::V1 => cid,
    }
}

/// Short, log-friendly rendering: the first four digest bytes in hex.
pub fn short_cid(cid: &Cid) -> String {
    let digest = cid.hash().digest();
    hex::encode(&digest[..digest.len().min(4)])
}
