//! Numeric multicodec codes understood by ipath.
//!
//! Codec codes select how a block's bytes are decoded; hash codes select the
//! hash function that produced a multihash digest.

/// Linked-file encoding (protobuf `PBNode`).
pub const DAG_PB: u64 = 0x70;
/// Opaque bytes.
pub const RAW: u64 = 0x55;
/// Structured encoding with JSON links (`{"/": "<cid>"}`).
pub const DAG_JSON: u64 = 0x0129;
/// Plain JSON, no link convention.
pub const JSON: u64 = 0x0200;
/// Structured CBOR encoding. Recognized, not registered by default.
pub const DAG_CBOR: u64 = 0x71;
/// Naming key. Identifiers with this codec address mutable names, never blocks.
pub const LIBP2P_KEY: u64 = 0x72;

/// SHA2-256 multihash code.
pub const SHA2_256: u64 = 0x12;
/// BLAKE3 multihash code (32-byte output).
pub const BLAKE3: u64 = 0x1e;

/// Human-readable name of a codec code, if known.
pub fn codec_name(code: u64) -> Option<&'static str> {
    match code {
        DAG_PB => Some("dag-pb"),
        RAW => Some("raw"),
        DAG_JSON => Some("dag-json"),
        JSON => Some("json"),
        DAG_CBOR => Some("dag-cbor"),
        LIBP2P_KEY => Some("libp2p-key"),
        _ => None,
    }
}

/// Human-readable name of a multihash code, if known.
pub fn hash_name(code: u64) -> Option<&'static str> {
    match code {
        SHA2_256 => Some("sha2-256"),
        BLAKE3 => Some("blake3"),
        _ => None,
    }
}

/// Returns `true` if the codec encodes linked-file nodes.
pub fn is_linked_file(code: u64) -> bool {
    code == DAG_PB
}
